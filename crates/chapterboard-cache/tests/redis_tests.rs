//! Integration tests for RedisCache
//!
//! These tests require a Redis server to be running.
//! Set the REDIS_URL environment variable to run these tests:
//!
//! ```bash
//! export REDIS_URL="redis://127.0.0.1:6379/15"
//! cargo test --package chapterboard-cache --features redis -- --ignored
//! ```

#[cfg(feature = "redis")]
mod redis_tests {
    use chapterboard_cache::{
        CacheStore, RateLimitConfig, RateLimitDecision, RateLimiter, RedisCache,
    };
    use redis::aio::ConnectionManager;
    use std::sync::Arc;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    /// Get Redis URL from environment or use default test database
    fn get_redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379/15".to_string())
    }

    /// Cache plus a raw connection for inspecting keys directly
    async fn setup_test_cache() -> (RedisCache, ConnectionManager) {
        let client = redis::Client::open(get_redis_url()).expect("Invalid REDIS_URL");
        let conn = ConnectionManager::new(client)
            .await
            .expect("Failed to connect to Redis. Make sure it is running and REDIS_URL is set correctly.");
        (RedisCache::with_manager(conn.clone()), conn)
    }

    /// Key suffix so concurrent runs do not share counters
    fn unique(name: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        format!("{}-{}-{}", name, std::process::id(), nanos)
    }

    async fn pttl(conn: &mut ConnectionManager, key: &str) -> i64 {
        redis::cmd("PTTL")
            .arg(key)
            .query_async(conn)
            .await
            .expect("PTTL failed")
    }

    #[tokio::test]
    #[ignore] // Requires Redis
    async fn test_thirty_first_increment_is_limited() {
        let (cache, _) = setup_test_cache().await;
        let limiter = RateLimiter::new(Arc::new(cache), RateLimitConfig::default());
        let client = unique("10.1.1.1");

        for i in 0..30 {
            assert!(
                limiter.consume(&client).await.is_allowed(),
                "request {} should pass",
                i + 1
            );
        }

        match limiter.consume(&client).await {
            RateLimitDecision::Limited { retry_after } => {
                assert!(retry_after <= Duration::from_secs(60));
                assert!(retry_after > Duration::ZERO);
            }
            other => panic!("expected Limited, got {:?}", other),
        }
    }

    #[tokio::test]
    #[ignore] // Requires Redis
    async fn test_counter_expires_within_window() {
        let (cache, mut conn) = setup_test_cache().await;
        let key = format!("rate_limit:{}", unique("10.1.1.2"));
        let window = Duration::from_secs(60);

        let first = cache.incr_window(&key, window).await.unwrap();
        assert_eq!(first.count, 1);
        let second = cache.incr_window(&key, window).await.unwrap();
        assert_eq!(second.count, 2);
        assert!(second.resets_in <= window);

        let ttl = pttl(&mut conn, &key).await;
        assert!(ttl > 0, "counter must carry an expiry, got {}", ttl);
        assert!(ttl <= 60_000, "expiry {} ms is longer than the window", ttl);
    }

    #[tokio::test]
    #[ignore] // Requires Redis
    async fn test_delete_prefix_leaves_rate_limit_keys() {
        let (cache, _) = setup_test_cache().await;
        let ttl = Duration::from_secs(60);
        let tag = unique("scan");

        let list_keys: Vec<String> = (0..450)
            .map(|i| format!("chapters:{}:{}:10", tag, i))
            .collect();
        for key in &list_keys {
            cache.set_ex(key, "[]", ttl).await.unwrap();
        }
        let counter = format!("rate_limit:{}", tag);
        cache.incr_window(&counter, ttl).await.unwrap();

        // More keys than one SCAN batch
        let removed = cache.delete_prefix("chapters:").await.unwrap();
        assert!(removed >= list_keys.len() as u64);

        assert_eq!(cache.get(&list_keys[0]).await.unwrap(), None);
        assert_eq!(cache.get(&list_keys[449]).await.unwrap(), None);
        assert_eq!(cache.get(&counter).await.unwrap().as_deref(), Some("1"));
    }

    #[tokio::test]
    #[ignore] // Requires Redis
    async fn test_set_ex_round_trip_with_ttl() {
        let (cache, mut conn) = setup_test_cache().await;
        let key = format!("chapters:{}", unique("payload"));

        cache
            .set_ex(&key, r#"{"chapters":[]}"#, Duration::from_secs(3600))
            .await
            .unwrap();

        assert_eq!(
            cache.get(&key).await.unwrap().as_deref(),
            Some(r#"{"chapters":[]}"#)
        );
        let ttl = pttl(&mut conn, &key).await;
        assert!(ttl > 0 && ttl <= 3_600_000);
    }
}
