//! Redis cache backend

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;

use crate::error::CacheResult;
use crate::store::{CacheStore, WindowCount};

const SCAN_BATCH: usize = 200;

/// Redis-backed cache
///
/// Holds a [`ConnectionManager`], which reconnects on its own after a
/// dropped connection. Cloning the manager per command is cheap.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Connect to Redis at `url` (e.g. "redis://127.0.0.1:6379")
    pub async fn connect(url: &str) -> CacheResult<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        tracing::info!("Connected to Redis at {}", url);
        Ok(Self { conn })
    }

    pub fn with_manager(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

/// Escape glob metacharacters so `prefix` matches literally in SCAN MATCH
fn match_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('*');
    pattern
}

#[async_trait]
impl CacheStore for RedisCache {
    fn backend_name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();
        Ok(conn.get::<_, Option<String>>(key).await?)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
            .await?;
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> CacheResult<u64> {
        let mut conn = self.conn.clone();
        let pattern = match_pattern(prefix);
        let mut cursor: u64 = 0;
        let mut removed: u64 = 0;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await?;

            if !keys.is_empty() {
                removed += conn.del::<_, u64>(&keys).await?;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        tracing::debug!("Deleted {} keys matching {}", removed, pattern);
        Ok(removed)
    }

    async fn incr_window(&self, key: &str, window: Duration) -> CacheResult<WindowCount> {
        let mut conn = self.conn.clone();
        let window_secs = window.as_secs().max(1);

        let (count, pttl): (u64, i64) = redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(key)
            .arg(0)
            .arg("EX")
            .arg(window_secs)
            .arg("NX")
            .ignore()
            .cmd("INCR")
            .arg(key)
            .cmd("PTTL")
            .arg(key)
            .query_async(&mut conn)
            .await?;

        // PTTL is negative when the key has no expiry; treat that as a full window
        let resets_in = if pttl > 0 {
            Duration::from_millis(pttl as u64)
        } else {
            Duration::from_secs(window_secs)
        };

        Ok(WindowCount { count, resets_in })
    }
}
