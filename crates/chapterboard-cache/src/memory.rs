//! In-memory cache backend
//!
//! Simple memory-based storage for testing and development. Expiry uses
//! tokio's clock so paused-time tests can advance past a TTL.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::{CacheError, CacheResult};
use crate::store::{CacheStore, WindowCount};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Default interval between sweeps of expired entries
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct Entries {
    map: HashMap<String, Entry>,
    last_sweep: Instant,
}

impl Entries {
    /// Drop expired entries once `interval` has passed since the last sweep
    fn sweep_if_due(&mut self, now: Instant, interval: Duration) {
        if now.saturating_duration_since(self.last_sweep) >= interval {
            self.map.retain(|_, e| e.is_live(now));
            self.last_sweep = now;
        }
    }
}

/// In-memory cache
///
/// Expired entries are dropped when read, and every write sweeps the whole
/// map at most once per sweep interval. Data is lost when the process
/// restarts.
pub struct MemoryCache {
    entries: Mutex<Entries>,
    sweep_interval: Duration,
}

impl MemoryCache {
    /// Create a new memory cache
    pub fn new() -> Self {
        Self::with_sweep_interval(DEFAULT_SWEEP_INTERVAL)
    }

    pub fn with_sweep_interval(sweep_interval: Duration) -> Self {
        Self {
            entries: Mutex::new(Entries {
                map: HashMap::new(),
                last_sweep: Instant::now(),
            }),
            sweep_interval,
        }
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .await
            .map
            .values()
            .filter(|e| e.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Number of stored entries, expired ones included
    pub async fn stored_len(&self) -> usize {
        self.entries.lock().await.map.len()
    }

    /// Remove expired entries now
    pub async fn cleanup(&self) {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries.map.retain(|_, e| e.is_live(now));
        entries.last_sweep = now;
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        match entries.map.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.map.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let now = Instant::now();
        let entry = Entry {
            value: value.to_string(),
            expires_at: now + ttl,
        };

        let mut entries = self.entries.lock().await;
        entries.sweep_if_due(now, self.sweep_interval);
        entries.map.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> CacheResult<u64> {
        let mut entries = self.entries.lock().await;
        let before = entries.map.len();
        entries.map.retain(|k, _| !k.starts_with(prefix));
        Ok((before - entries.map.len()) as u64)
    }

    async fn incr_window(&self, key: &str, window: Duration) -> CacheResult<WindowCount> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries.sweep_if_due(now, self.sweep_interval);

        let entry = entries
            .map
            .entry(key.to_string())
            .and_modify(|e| {
                if !e.is_live(now) {
                    e.value = "0".to_string();
                    e.expires_at = now + window;
                }
            })
            .or_insert_with(|| Entry {
                value: "0".to_string(),
                expires_at: now + window,
            });

        let count = entry
            .value
            .parse::<u64>()
            .map_err(|e| CacheError::CorruptValue {
                key: key.to_string(),
                reason: e.to_string(),
            })?
            + 1;
        entry.value = count.to_string();

        Ok(WindowCount {
            count,
            resets_in: entry.expires_at.saturating_duration_since(now),
        })
    }
}
