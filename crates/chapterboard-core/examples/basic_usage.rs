//! Basic usage example for chapterboard-core
//!
//! Run with: cargo run --example basic_usage

use chapterboard_core::{
    page_year_total, yearly_totals, ChapterId, ListQuery, ListRequest, NewChapter,
};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    println!("=== Chapterboard Core Basic Usage Example ===\n");

    // Example 1: Validating an incoming record
    println!("1. Validating a chapter document:");
    let document = json!({
        "subject": "Physics",
        "chapter": "Kinematics",
        "class": "Class 11",
        "unit": "Mechanics",
        "yearWiseQuestionCount": {"2023": 5, "2024": 3},
        "status": "Completed"
    });
    let chapter = NewChapter::from_json(&document)?;
    println!("   Valid: {} / {}\n", chapter.subject, chapter.chapter);

    // Example 2: Collecting every problem with a bad record
    println!("2. Rejecting an invalid document:");
    let invalid = json!({"subject": "Physics", "status": "Done"});
    match NewChapter::from_json(&invalid) {
        Ok(_) => println!("   Unexpectedly valid"),
        Err(e) => println!("   {}\n", e),
    }

    // Example 3: Parsing list query parameters
    println!("3. Parsing list query parameters:");
    let request = ListRequest::from(ListQuery {
        subject: Some("Physics".to_string()),
        is_weak_chapter: Some("true".to_string()),
        year: Some("2023".to_string()),
        page: Some("2".to_string()),
        limit: Some("0".to_string()),
        ..ListQuery::default()
    });
    println!("   Filter: {:?}", request.filter);
    println!(
        "   Page {} of size {} (skip {})",
        request.pagination.page,
        request.pagination.limit,
        request.pagination.skip()
    );
    println!("   Cache key: {}\n", request.cache_key()?);

    // Example 4: Aggregating year-wise counts
    println!("4. Aggregating question counts:");
    let stored = vec![chapter.into_chapter(ChapterId::new(), chapterboard_core::timestamp_now())];
    println!("   2023 on this page: {}", page_year_total(&stored, "2023"));
    println!("   All years: {:?}", yearly_totals(&stored));

    Ok(())
}
