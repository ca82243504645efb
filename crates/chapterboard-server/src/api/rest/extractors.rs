//! Custom extractors
//!
//! Provides the admin gate for write endpoints.

use super::types::AppState;
use crate::error::ServerError;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Header carrying the admin shared secret
pub const ADMIN_KEY_HEADER: &str = "x-api-key";

/// Proof that the request carried the admin key.
///
/// Place it before any body extractor so a rejected request is answered
/// without reading its body.
#[derive(Debug, Clone, Copy)]
pub struct AdminGuard;

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminGuard {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(ADMIN_KEY_HEADER)
            .and_then(|v| v.to_str().ok());

        match (state.admin_api_key.as_deref(), provided) {
            (Some(expected), Some(provided)) if keys_match(expected, provided) => Ok(AdminGuard),
            (None, _) => {
                tracing::warn!("Admin request refused: no admin key configured");
                Err(forbidden())
            }
            _ => {
                tracing::warn!("Admin request refused: missing or wrong {}", ADMIN_KEY_HEADER);
                Err(forbidden())
            }
        }
    }
}

fn forbidden() -> ServerError {
    ServerError::Forbidden("Admins only".to_string())
}

/// Compares every byte instead of stopping at the first mismatch
fn keys_match(expected: &str, provided: &str) -> bool {
    let (a, b) = (expected.as_bytes(), provided.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
