//! Server error types

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chapterboard_cache::CacheError;
use chapterboard_core::CoreError;
use chapterboard_repository::RepositoryError;
use serde_json::json;
use thiserror::Error;

pub const RATE_LIMITED_MESSAGE: &str = "Too many requests, please try again later.";
pub const INTERNAL_MESSAGE: &str = "Internal server error";
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Uploaded file is too large";

/// Server error type
#[derive(Error, Debug)]
pub enum ServerError {
    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or wrong admin key
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request body over the configured limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Client exceeded its request budget
    #[error("Rate limited")]
    RateLimited,

    /// Internal server error; the detail is logged, never returned
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ServerError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            ServerError::InvalidRequest(msg)
            | ServerError::NotFound(msg)
            | ServerError::PayloadTooLarge(msg) => msg,
            ServerError::Forbidden(msg) => format!("Forbidden: {}", msg),
            ServerError::RateLimited => RATE_LIMITED_MESSAGE.to_string(),
            ServerError::InternalError(detail) => {
                tracing::error!("Internal server error: {}", detail);
                INTERNAL_MESSAGE.to_string()
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

impl From<RepositoryError> for ServerError {
    fn from(err: RepositoryError) -> Self {
        ServerError::InternalError(err.to_string())
    }
}

impl From<CacheError> for ServerError {
    fn from(err: CacheError) -> Self {
        ServerError::InternalError(err.to_string())
    }
}

impl From<CoreError> for ServerError {
    fn from(err: CoreError) -> Self {
        ServerError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::InternalError(err.to_string())
    }
}

impl From<MultipartError> for ServerError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge(PAYLOAD_TOO_LARGE_MESSAGE.to_string())
        } else {
            ServerError::InvalidRequest(format!("Invalid multipart body: {}", err.body_text()))
        }
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::InternalError(err.to_string())
    }
}
