//! Server configuration

use anyhow::Context;
use chapterboard_cache::{FailurePolicy, RateLimitConfig};
use serde::Deserialize;
use std::time::Duration;

/// Upload body limit when none is configured (50 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Rate limiting applied to the chapter routes
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    /// Enable rate limiting
    pub enabled: bool,

    /// Requests allowed per client per window
    pub points: u32,

    /// Window length in seconds
    pub window_secs: u64,

    /// Behavior when the counter backend fails ("allow" or "reject")
    pub on_backend_failure: FailurePolicy,

    /// Key clients by X-Forwarded-For / X-Real-IP instead of the peer address.
    /// Only enable behind a proxy that sets these headers.
    pub trust_forwarded_for: bool,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            points: 30,
            window_secs: 60,
            on_backend_failure: FailurePolicy::Allow,
            trust_forwarded_for: false,
        }
    }
}

impl RateLimitSettings {
    pub fn limiter_config(&self) -> RateLimitConfig {
        RateLimitConfig {
            points: self.points,
            window: Duration::from_secs(self.window_secs),
            on_backend_failure: self.on_backend_failure,
            ..RateLimitConfig::default()
        }
    }
}

/// Server configuration
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    /// PostgreSQL URL for chapter storage.
    /// If not set, chapters are kept in memory.
    pub database_url: Option<String>,

    /// Redis URL for the response cache and rate limit counters.
    /// If not set, an in-memory cache is used.
    pub redis_url: Option<String>,

    /// Shared secret for the upload endpoint
    pub admin_api_key: Option<String>,

    /// Lifetime of cached list responses
    pub cache_ttl_secs: u64,

    /// Largest accepted upload request body, in bytes
    pub max_upload_bytes: usize,

    pub rate_limit: RateLimitSettings,

    /// Log level
    pub log_level: String,

    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: None,
            redis_url: None,
            admin_api_key: None,
            cache_ttl_secs: 3600,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            rate_limit: RateLimitSettings::default(),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

// Secrets stay out of logs
impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("redis_url", &self.redis_url.as_ref().map(|_| "<set>"))
            .field("admin_api_key", &self.admin_api_key.as_ref().map(|_| "<set>"))
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("rate_limit", &self.rate_limit)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, `config/server.*` and environment variables.
    ///
    /// Nested keys use `__` in environment variables, e.g.
    /// `CHAPTERBOARD_RATE_LIMIT__POINTS=100`. The conventional `PORT`,
    /// `DATABASE_URL`, `REDIS_URL` and `ADMIN_API_KEY` variables are applied last.
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let mut config: Self = config::Config::builder()
            .add_source(config::File::with_name("config/server").required(false))
            .add_source(
                config::Environment::with_prefix("CHAPTERBOARD")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Failed to deserialize config")?;

        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply the conventional unprefixed variables. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {}", port))?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = Some(url);
        }
        if let Some(url) = lookup("REDIS_URL") {
            self.redis_url = Some(url);
        }
        if let Some(key) = lookup("ADMIN_API_KEY") {
            self.admin_api_key = Some(key);
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
