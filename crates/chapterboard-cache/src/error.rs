//! Cache error types

use thiserror::Error;

/// Cache error
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backend was never connected
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),

    /// Redis command failed
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    /// Stored value has an unexpected shape
    #[error("Corrupt cache value at {key}: {reason}")]
    CorruptValue { key: String, reason: String },
}

/// Result type for cache operations
pub type CacheResult<T> = std::result::Result<T, CacheError>;
