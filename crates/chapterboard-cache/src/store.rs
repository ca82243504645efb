//! Cache store trait

use async_trait::async_trait;
use std::time::Duration;

use crate::error::CacheResult;

/// State of a fixed-window counter after one increment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCount {
    /// Requests counted in the current window, including this one
    pub count: u64,
    /// Time until the window closes and the counter expires
    pub resets_in: Duration,
}

/// Key-value store with per-key expiry
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;

    /// Value stored at `key`, if present and not expired
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Store `value` at `key`, expiring after `ttl`
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Delete every key starting with `prefix`, returning how many were removed
    async fn delete_prefix(&self, prefix: &str) -> CacheResult<u64>;

    /// Atomically increment the counter at `key`.
    ///
    /// The first increment of a window creates the counter with expiry
    /// `window`; later increments leave the expiry alone.
    async fn incr_window(&self, key: &str, window: Duration) -> CacheResult<WindowCount>;
}
