//! Tracing subscriber setup

use crate::config::{LogFormat, ServerConfig};
use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(level: &str) -> String {
    format!(
        "chapterboard_server={level},chapterboard_cache={level},chapterboard_repository={level},tower_http=debug",
        level = level
    )
}

/// Initialize tracing subscriber
pub fn init_tracing(config: &ServerConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(&config.log_level).into());

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.log_format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_workspace_crates() {
        let filter = default_filter("debug");
        assert!(filter.contains("chapterboard_server=debug"));
        assert!(filter.contains("chapterboard_cache=debug"));
        assert!(filter.contains("tower_http=debug"));
        assert!(filter.parse::<EnvFilter>().is_ok());
    }
}
