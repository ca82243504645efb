//! API endpoint handlers
//!
//! HTTP request handlers for all REST API endpoints.

use super::extractors::AdminGuard;
use super::types::*;
use crate::error::ServerError;
use axum::{
    body::Bytes,
    extract::{Multipart, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chapterboard_core::{Chapter, ListQuery, ListRequest, StatsQuery};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::info;

/// Multipart field holding the uploaded chapter file
const UPLOAD_FIELD: &str = "file";

/// Landing banner
pub(super) async fn banner() -> &'static str {
    "Chapter Performance Dashboard API"
}

/// Health check endpoint
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List chapters with filters and pagination
pub(super) async fn list_chapters(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ServerError> {
    let request = ListRequest::from(query);
    let payload = state.pipeline.list(&request).await?;

    // Cached payloads go out exactly as stored
    Ok(([(header::CONTENT_TYPE, "application/json")], payload).into_response())
}

/// Fetch one chapter by id
pub(super) async fn get_chapter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Chapter>, ServerError> {
    Ok(Json(state.pipeline.get(&id).await?))
}

/// Year → question count totals over all matching chapters
pub(super) async fn yearly_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<BTreeMap<String, u64>>, ServerError> {
    let filter = query.into_filter();
    Ok(Json(state.pipeline.yearly_stats(&filter).await?))
}

/// Bulk upload of a JSON array file (admin only)
#[axum::debug_handler]
pub(super) async fn upload_chapters(
    State(state): State<AppState>,
    _admin: AdminGuard,
    multipart: Option<Multipart>,
) -> Result<Json<UploadResponse>, ServerError> {
    let file = match multipart {
        Some(multipart) => read_upload(multipart).await?,
        None => None,
    };
    let Some(file) = file else {
        return Err(ServerError::InvalidRequest("No file uploaded".to_string()));
    };

    let records = match serde_json::from_slice::<Value>(&file) {
        Ok(Value::Array(records)) => records,
        Ok(_) => {
            return Err(ServerError::InvalidRequest(
                "Uploaded file must contain a JSON array".to_string(),
            ))
        }
        Err(e) => {
            return Err(ServerError::InvalidRequest(format!(
                "Uploaded file is not valid JSON: {}",
                e
            )))
        }
    };

    info!("Received upload with {} chapter records", records.len());
    let outcome = state.pipeline.upload(records).await?;
    Ok(Json(outcome.into()))
}

/// Body of the `file` field, if present. Other fields are skipped.
async fn read_upload(mut multipart: Multipart) -> Result<Option<Bytes>, ServerError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        if !is_json_content_type(field.content_type()) {
            return Err(ServerError::InvalidRequest(
                "Only JSON files are allowed!".to_string(),
            ));
        }

        return Ok(Some(field.bytes().await?));
    }

    Ok(None)
}

/// `application/json`, ignoring parameters such as charset
fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .map(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}
