//! REST API implementation
//!
//! - types: Application state and response bodies
//! - extractors: Admin gate
//! - middleware: Per-client rate limiting
//! - handlers: API endpoint handlers
//! - router: Router creation and configuration

mod extractors;
mod handlers;
mod middleware;
mod router;
pub mod types;

// Re-export public API
pub use extractors::{AdminGuard, ADMIN_KEY_HEADER};
pub use middleware::client_address;
pub use router::create_router;
pub use types::{AppState, HealthResponse, UploadResponse};
