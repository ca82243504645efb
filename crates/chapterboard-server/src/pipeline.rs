//! Chapter request pipeline
//!
//! Sits between the HTTP handlers and the store/cache handles:
//! - List: cache read-through keyed by filter and pagination
//! - Get by id and yearly stats: straight to the store
//! - Upload: per-record validate-and-insert, then drop every cached list

use chapterboard_cache::CacheStore;
use chapterboard_core::{
    page_year_total, yearly_totals, Chapter, ChapterFilter, ChapterId, ListRequest, NewChapter,
    PaginationMeta, CHAPTER_CACHE_NAMESPACE,
};
use chapterboard_repository::{ChapterRepository, FindWindow, RepositoryError};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::ServerError;

/// Body of the list endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub chapters: Vec<Chapter>,
    pub pagination: PaginationMeta,
    /// Sum of the requested year's counts over this page only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_stats: Option<u64>,
}

/// An upload element that was not stored
#[derive(Debug, Clone, Serialize)]
pub struct FailedRecord {
    pub data: Value,
    pub error: String,
}

/// Per-record result of an upload
#[derive(Debug, Default)]
pub struct UploadOutcome {
    pub successful: Vec<Chapter>,
    pub failed: Vec<FailedRecord>,
}

/// Chapter request pipeline
#[derive(Clone)]
pub struct ChapterPipeline {
    repository: Arc<dyn ChapterRepository>,
    cache: Arc<dyn CacheStore>,
    cache_ttl: Duration,
}

impl ChapterPipeline {
    pub fn new(
        repository: Arc<dyn ChapterRepository>,
        cache: Arc<dyn CacheStore>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            cache,
            cache_ttl,
        }
    }

    /// Serialized list payload for `request`.
    ///
    /// A cached payload is returned as stored, byte for byte.
    pub async fn list(&self, request: &ListRequest) -> Result<String, ServerError> {
        let key = request.cache_key()?;

        if let Some(cached) = self.cache.get(&key).await? {
            debug!("Cache hit for {}", key);
            return Ok(cached);
        }
        debug!("Cache miss for {}", key);

        let window = FindWindow::page(request.pagination.skip(), request.pagination.limit);
        let (chapters, total) = tokio::try_join!(
            self.repository.find(&request.filter, window),
            self.repository.count(&request.filter),
        )?;

        let year_stats = request
            .year
            .as_deref()
            .map(|year| page_year_total(&chapters, year));

        let response = ListResponse {
            chapters,
            pagination: request.pagination.meta(total),
            year_stats,
        };
        let payload = serde_json::to_string(&response)?;

        self.cache.set_ex(&key, &payload, self.cache_ttl).await?;
        Ok(payload)
    }

    /// Single chapter by id. Ids that do not parse are reported as not found.
    pub async fn get(&self, id: &str) -> Result<Chapter, ServerError> {
        let not_found = || ServerError::NotFound("Chapter not found".to_string());

        let id: ChapterId = id.parse().map_err(|_| not_found())?;
        self.repository.find_by_id(&id).await?.ok_or_else(not_found)
    }

    /// Year → question count totals over every chapter matching `filter`
    pub async fn yearly_stats(
        &self,
        filter: &ChapterFilter,
    ) -> Result<BTreeMap<String, u64>, ServerError> {
        let chapters = self.repository.find_all(filter).await?;
        Ok(yearly_totals(&chapters))
    }

    /// Validate and store each record independently, then invalidate cached lists.
    ///
    /// A bad record never stops the batch; it lands in `failed` with its error.
    pub async fn upload(&self, records: Vec<Value>) -> Result<UploadOutcome, ServerError> {
        let mut outcome = UploadOutcome::default();

        for data in records {
            let chapter = match NewChapter::from_json(&data) {
                Ok(chapter) => chapter,
                Err(e) => {
                    outcome.failed.push(FailedRecord {
                        data,
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            match self.repository.insert(chapter).await {
                Ok(stored) => outcome.successful.push(stored),
                Err(e) => {
                    warn!("Failed to store uploaded chapter: {}", e);
                    let error = match e {
                        RepositoryError::WriteRejected(reason) => reason,
                        _ => "Failed to store chapter".to_string(),
                    };
                    outcome.failed.push(FailedRecord { data, error });
                }
            }
        }

        let removed = self.invalidate_lists().await?;
        info!(
            "Upload processed: {} stored, {} failed, {} cached lists invalidated",
            outcome.successful.len(),
            outcome.failed.len(),
            removed
        );

        Ok(outcome)
    }

    /// Delete every cached list payload
    pub async fn invalidate_lists(&self) -> Result<u64, ServerError> {
        let prefix = format!("{}:", CHAPTER_CACHE_NAMESPACE);
        Ok(self.cache.delete_prefix(&prefix).await?)
    }
}
