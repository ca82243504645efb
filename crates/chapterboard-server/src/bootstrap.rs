//! Store and cache initialization
//!
//! Builds the shared handles from [`ServerConfig`] before the listener binds.
//! Each handle is either connected or replaced by its fallback by the time
//! the router is built.

use crate::api::rest::AppState;
use crate::config::ServerConfig;
use crate::pipeline::ChapterPipeline;
use anyhow::Result;
use chapterboard_cache::{CacheStore, MemoryCache, OfflineCache, RateLimiter};
use chapterboard_repository::{ChapterRepository, MemoryRepository};
use std::sync::Arc;
use tracing::{info, warn};

/// Initialize the chapter store.
///
/// A configured database that cannot be reached is a startup error.
pub async fn init_repository(config: &ServerConfig) -> Result<Arc<dyn ChapterRepository>> {
    let Some(database_url) = config.database_url.as_deref() else {
        warn!("Database URL not configured, chapters will be kept in memory");
        return Ok(Arc::new(MemoryRepository::new()));
    };

    connect_repository(database_url).await
}

#[cfg(feature = "postgres")]
async fn connect_repository(database_url: &str) -> Result<Arc<dyn ChapterRepository>> {
    use chapterboard_repository::PostgresRepository;

    let repo = PostgresRepository::new(database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;
    repo.ensure_schema().await?;
    info!("✓ Connected to PostgreSQL chapter store");
    Ok(Arc::new(repo))
}

#[cfg(not(feature = "postgres"))]
async fn connect_repository(_database_url: &str) -> Result<Arc<dyn ChapterRepository>> {
    Err(anyhow::anyhow!(
        "DATABASE_URL is set but the server was built without the `postgres` feature"
    ))
}

/// Initialize the cache shared by list responses and rate limit counters.
///
/// An unreachable Redis does not stop startup; an [`OfflineCache`] takes its
/// place and the rate limiter's failure policy decides what happens next.
pub async fn init_cache(config: &ServerConfig) -> Arc<dyn CacheStore> {
    let Some(redis_url) = config.redis_url.as_deref() else {
        warn!("Redis URL not configured, using in-memory cache");
        return Arc::new(MemoryCache::new());
    };

    connect_cache(redis_url).await
}

#[cfg(feature = "redis")]
async fn connect_cache(redis_url: &str) -> Arc<dyn CacheStore> {
    use chapterboard_cache::RedisCache;

    match RedisCache::connect(redis_url).await {
        Ok(cache) => Arc::new(cache),
        Err(e) => {
            warn!("Failed to connect to Redis, cache is offline: {}", e);
            Arc::new(OfflineCache::new(e.to_string()))
        }
    }
}

#[cfg(not(feature = "redis"))]
async fn connect_cache(_redis_url: &str) -> Arc<dyn CacheStore> {
    warn!("REDIS_URL is set but the server was built without the `redis` feature");
    Arc::new(OfflineCache::new("redis support not compiled in"))
}

/// Build the application state from already-initialized handles
pub fn build_state(
    config: &ServerConfig,
    repository: Arc<dyn ChapterRepository>,
    cache: Arc<dyn CacheStore>,
) -> AppState {
    let pipeline = ChapterPipeline::new(repository, cache.clone(), config.cache_ttl());
    let limiter = RateLimiter::new(cache, config.rate_limit.limiter_config());

    AppState {
        pipeline,
        limiter,
        rate_limit: config.rate_limit.clone(),
        admin_api_key: config.admin_api_key.clone().map(Arc::from),
        max_upload_bytes: config.max_upload_bytes,
    }
}

/// Initialize every handle and assemble the application state
pub async fn init_state(config: &ServerConfig) -> Result<AppState> {
    let repository = init_repository(config).await?;
    let cache = init_cache(config).await;
    info!(
        "Chapter store ready, cache backend: {}",
        cache.backend_name()
    );

    Ok(build_state(config, repository, cache))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults_use_memory_backends() {
        let config = ServerConfig::default();

        let cache = init_cache(&config).await;
        assert_eq!(cache.backend_name(), "memory");

        let state = init_state(&config).await.unwrap();
        assert!(state.admin_api_key.is_none());
        assert!(state.rate_limit.enabled);
    }
}
