//! Fixed-window rate limiter
//!
//! Each client gets `points` requests per `window`. The counter lives in a
//! [`CacheStore`] under `<key_prefix>:<client>` and expires when the window
//! closes, so the next request after that starts a fresh window.

use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::store::CacheStore;

/// What to do when the backing store cannot count a request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Let the request through unlimited (fail open)
    #[default]
    Allow,
    /// Turn the request away (fail closed)
    Reject,
}

/// Rate limiter settings
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub points: u32,
    pub window: Duration,
    pub key_prefix: String,
    pub on_backend_failure: FailurePolicy,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            points: 30,
            window: Duration::from_secs(60),
            key_prefix: "rate_limit".to_string(),
            on_backend_failure: FailurePolicy::Allow,
        }
    }
}

/// Outcome of consuming one point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Within budget
    Allowed { remaining: u32 },
    /// Over budget until the window resets
    Limited { retry_after: Duration },
    /// Backend failed and the policy let the request through
    Bypassed,
    /// Backend failed and the policy turned the request away
    Unavailable,
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. } | Self::Bypassed)
    }
}

/// Fixed-window rate limiter over a shared [`CacheStore`]
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn CacheStore>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn CacheStore>, config: RateLimitConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    fn key(&self, client: &str) -> String {
        format!("{}:{}", self.config.key_prefix, client)
    }

    /// Consume one point for `client`
    pub async fn consume(&self, client: &str) -> RateLimitDecision {
        let key = self.key(client);

        match self.store.incr_window(&key, self.config.window).await {
            Ok(window) if window.count <= u64::from(self.config.points) => {
                RateLimitDecision::Allowed {
                    remaining: self.config.points - window.count as u32,
                }
            }
            Ok(window) => {
                tracing::warn!(
                    "Rate limit exceeded for {} ({} requests, resets in {:?})",
                    client,
                    window.count,
                    window.resets_in
                );
                RateLimitDecision::Limited {
                    retry_after: window.resets_in,
                }
            }
            Err(e) => match self.config.on_backend_failure {
                FailurePolicy::Allow => {
                    tracing::warn!(
                        "Rate limiter backend {} failed, allowing request: {}",
                        self.store.backend_name(),
                        e
                    );
                    RateLimitDecision::Bypassed
                }
                FailurePolicy::Reject => {
                    tracing::error!(
                        "Rate limiter backend {} failed, rejecting request: {}",
                        self.store.backend_name(),
                        e
                    );
                    RateLimitDecision::Unavailable
                }
            },
        }
    }
}
