//! Router creation and configuration

use super::handlers::*;
use super::middleware::rate_limit;
use super::types::AppState;
use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create REST API router
///
/// Every `/api/v1/chapters` route passes through the rate limiter; `/` and
/// `/health` do not. Upload bodies are capped at `max_upload_bytes`.
pub fn create_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    let chapters = Router::new()
        .route(
            "/",
            get(list_chapters).post(upload_chapters).layer(upload_limit),
        )
        .route("/stats/yearly", get(yearly_stats))
        .route("/:id", get(get_chapter))
        .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit));

    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .nest("/api/v1/chapters", chapters)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
