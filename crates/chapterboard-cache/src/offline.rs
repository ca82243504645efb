//! Stand-in for a cache backend that could not be reached

use async_trait::async_trait;
use std::time::Duration;

use crate::error::{CacheError, CacheResult};
use crate::store::{CacheStore, WindowCount};

/// Cache whose every operation fails with [`CacheError::Unavailable`]
///
/// Installed when the configured backend is unreachable at startup, so the
/// server still boots and each caller decides how to degrade.
#[derive(Debug, Clone)]
pub struct OfflineCache {
    reason: String,
}

impl OfflineCache {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn unavailable<T>(&self) -> CacheResult<T> {
        Err(CacheError::Unavailable(self.reason.clone()))
    }
}

#[async_trait]
impl CacheStore for OfflineCache {
    fn backend_name(&self) -> &'static str {
        "offline"
    }

    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        self.unavailable()
    }

    async fn set_ex(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
        self.unavailable()
    }

    async fn delete_prefix(&self, _prefix: &str) -> CacheResult<u64> {
        self.unavailable()
    }

    async fn incr_window(&self, _key: &str, _window: Duration) -> CacheResult<WindowCount> {
        self.unavailable()
    }
}
