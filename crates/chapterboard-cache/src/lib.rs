//! Chapterboard cache layer
//!
//! Key-value storage with expiry, used for two things:
//! - Caching serialized list responses under the `chapters:` namespace
//! - Backing the fixed-window rate limiter's per-client counters
//!
//! Backends implement [`CacheStore`]: [`MemoryCache`] for development and
//! tests, `RedisCache` (feature `redis`) for production, and
//! [`OfflineCache`] standing in for a backend that could not be reached.

pub mod error;
pub mod memory;
pub mod offline;
pub mod rate_limit;
pub mod store;

#[cfg(feature = "redis")]
pub mod redis;

pub use error::{CacheError, CacheResult};
pub use memory::MemoryCache;
pub use offline::OfflineCache;
pub use rate_limit::{FailurePolicy, RateLimitConfig, RateLimitDecision, RateLimiter};
pub use store::{CacheStore, WindowCount};

#[cfg(feature = "redis")]
pub use crate::redis::RedisCache;
