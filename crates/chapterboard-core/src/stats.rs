//! Year-wise question count aggregation

use std::collections::BTreeMap;

use crate::model::Chapter;

/// Sum of `year`'s question count over the given chapters.
///
/// Untracked years contribute zero.
pub fn page_year_total(chapters: &[Chapter], year: &str) -> u64 {
    chapters
        .iter()
        .map(|c| u64::from(c.year_wise_question_count.get(year).unwrap_or(0)))
        .sum()
}

/// Per-year totals over all given chapters. Empty input yields an empty map.
pub fn yearly_totals(chapters: &[Chapter]) -> BTreeMap<String, u64> {
    let mut totals = BTreeMap::new();
    for chapter in chapters {
        for (year, count) in chapter.year_wise_question_count.iter() {
            *totals.entry(year.to_string()).or_insert(0) += u64::from(count);
        }
    }
    totals
}
