//! Bulk import
//!
//! Replaces the whole chapter collection with the contents of a JSON file.
//! Unlike the upload endpoint this is all-or-nothing: one invalid record
//! aborts the import before anything is deleted.

use anyhow::{bail, Context, Result};
use chapterboard_cache::CacheStore;
use chapterboard_core::{NewChapter, CHAPTER_CACHE_NAMESPACE};
use chapterboard_repository::ChapterRepository;
use serde_json::Value;
use tracing::{info, warn};

/// Result of a completed import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub removed: u64,
    pub inserted: usize,
    /// `None` when cache invalidation was skipped or failed
    pub invalidated: Option<u64>,
}

/// Parse and validate every record of an import file
pub fn parse_import(raw: &str) -> Result<Vec<NewChapter>> {
    let value: Value = serde_json::from_str(raw).context("Import file is not valid JSON")?;
    let Value::Array(records) = value else {
        bail!("Import file must contain a JSON array");
    };

    let mut chapters = Vec::with_capacity(records.len());
    let mut errors = Vec::new();
    for (index, record) in records.iter().enumerate() {
        match NewChapter::from_json(record) {
            Ok(chapter) => chapters.push(chapter),
            Err(e) => errors.push(format!("record {}: {}", index, e)),
        }
    }

    if !errors.is_empty() {
        bail!(
            "{} of {} records are invalid:\n  {}",
            errors.len(),
            records.len(),
            errors.join("\n  ")
        );
    }

    Ok(chapters)
}

/// Delete every stored chapter, insert `chapters`, then clear cached lists.
///
/// Cache failures are logged and do not fail the import.
pub async fn replace_all(
    repository: &dyn ChapterRepository,
    cache: Option<&dyn CacheStore>,
    chapters: Vec<NewChapter>,
) -> Result<ImportSummary> {
    info!("Clearing existing chapters");
    let removed = repository.delete_all().await?;

    info!("Importing {} chapters", chapters.len());
    let inserted = repository.insert_many(chapters).await?.len();

    let invalidated = match cache {
        Some(cache) => {
            let prefix = format!("{}:", CHAPTER_CACHE_NAMESPACE);
            match cache.delete_prefix(&prefix).await {
                Ok(count) => Some(count),
                Err(e) => {
                    warn!("Imported chapters but failed to clear cached lists: {}", e);
                    None
                }
            }
        }
        None => None,
    };

    Ok(ImportSummary {
        removed,
        inserted,
        invalidated,
    })
}
