//! Chapterboard HTTP server
//!
//! Serves filtered, paginated chapter records over REST.

use anyhow::Result;
use chapterboard_server::{api, bootstrap, config::ServerConfig, logging};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Initialize tracing
    logging::init_tracing(&config)?;
    info!("Loaded configuration: {:?}", config);

    // Connect store and cache before accepting requests
    let state = bootstrap::init_state(&config).await?;
    let app = api::create_router(state);

    // Start server
    let addr = config.bind_address();
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("✓ Server listening on http://{}", addr);
    info!("  Health check: http://{}/health", addr);
    info!("  Chapters API: http://{}/api/v1/chapters", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
