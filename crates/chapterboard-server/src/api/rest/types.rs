//! REST API type definitions

use crate::config::RateLimitSettings;
use crate::pipeline::{ChapterPipeline, FailedRecord, UploadOutcome};
use chapterboard_cache::RateLimiter;
use chapterboard_core::Chapter;
use serde::Serialize;
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: ChapterPipeline,
    pub limiter: RateLimiter,
    pub rate_limit: RateLimitSettings,
    /// Upload is refused for everyone when unset
    pub admin_api_key: Option<Arc<str>>,
    /// Body limit of the upload route, in bytes
    pub max_upload_bytes: usize,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Upload endpoint response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub successful: Vec<Chapter>,
    pub failed: Vec<FailedRecord>,
}

impl From<UploadOutcome> for UploadResponse {
    fn from(outcome: UploadOutcome) -> Self {
        Self {
            message: "Chapters processed".to_string(),
            successful: outcome.successful,
            failed: outcome.failed,
        }
    }
}
