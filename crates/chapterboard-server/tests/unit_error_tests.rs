//! Unit tests for ServerError responses

use axum::{http::StatusCode, response::IntoResponse};
use chapterboard_cache::CacheError;
use chapterboard_core::CoreError;
use chapterboard_repository::RepositoryError;
use chapterboard_server::error::{ServerError, INTERNAL_MESSAGE, RATE_LIMITED_MESSAGE};
use http_body_util::BodyExt;
use serde_json::Value;

async fn into_parts(err: ServerError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_status_codes() {
    let cases = [
        (ServerError::InvalidRequest("No file uploaded".to_string()), StatusCode::BAD_REQUEST),
        (ServerError::Forbidden("Admins only".to_string()), StatusCode::FORBIDDEN),
        (ServerError::NotFound("Chapter not found".to_string()), StatusCode::NOT_FOUND),
        (ServerError::RateLimited, StatusCode::TOO_MANY_REQUESTS),
        (ServerError::InternalError("boom".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (err, expected) in cases {
        let (status, body) = into_parts(err).await;
        assert_eq!(status, expected);
        assert_eq!(body["status"], expected.as_u16());
    }
}

#[tokio::test]
async fn test_client_errors_carry_their_message() {
    let (_, body) = into_parts(ServerError::InvalidRequest("No file uploaded".to_string())).await;
    assert_eq!(body["error"], "No file uploaded");

    let (_, body) = into_parts(ServerError::RateLimited).await;
    assert_eq!(body["error"], RATE_LIMITED_MESSAGE);
}

#[tokio::test]
async fn test_backend_errors_become_generic_500() {
    let errors: Vec<ServerError> = vec![
        RepositoryError::CorruptRecord {
            id: "abc".to_string(),
            reason: "bad status".to_string(),
        }
        .into(),
        CacheError::Unavailable("redis unreachable".to_string()).into(),
        CoreError::InvalidValue("bad".to_string()).into(),
        anyhow::anyhow!("something went wrong").into(),
    ];

    for err in errors {
        assert!(err.to_string().starts_with("Internal error"));
        let (status, body) = into_parts(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_MESSAGE);
    }
}
