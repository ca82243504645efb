//! Unit tests for ServerConfig file and environment layering

use chapterboard_cache::FailurePolicy;
use chapterboard_server::config::{LogFormat, ServerConfig};
use std::time::Duration;

fn from_toml(toml: &str) -> ServerConfig {
    config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap()
}

#[test]
fn test_empty_file_gives_defaults() {
    let config = from_toml("");

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 3000);
    assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
    assert!(config.rate_limit.enabled);
    assert_eq!(config.rate_limit.points, 30);
    assert_eq!(config.rate_limit.window_secs, 60);
}

#[test]
fn test_full_file() {
    let config = from_toml(
        r#"
        host = "127.0.0.1"
        port = 8080
        database_url = "postgresql://localhost/chapterboard"
        redis_url = "redis://127.0.0.1:6379"
        admin_api_key = "s3cret"
        cache_ttl_secs = 120
        max_upload_bytes = 10485760
        log_level = "debug"
        log_format = "json"

        [rate_limit]
        enabled = true
        points = 100
        window_secs = 30
        on_backend_failure = "reject"
        trust_forwarded_for = true
        "#,
    );

    assert_eq!(config.bind_address(), "127.0.0.1:8080");
    assert_eq!(
        config.database_url.as_deref(),
        Some("postgresql://localhost/chapterboard")
    );
    assert_eq!(config.cache_ttl(), Duration::from_secs(120));
    assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    assert_eq!(config.log_format, LogFormat::Json);

    let limiter = config.rate_limit.limiter_config();
    assert_eq!(limiter.points, 100);
    assert_eq!(limiter.window, Duration::from_secs(30));
    assert_eq!(limiter.on_backend_failure, FailurePolicy::Reject);
    assert!(config.rate_limit.trust_forwarded_for);
}

#[test]
fn test_partial_rate_limit_section_keeps_other_defaults() {
    let config = from_toml(
        r#"
        [rate_limit]
        points = 5
        "#,
    );

    assert_eq!(config.rate_limit.points, 5);
    assert_eq!(config.rate_limit.window_secs, 60);
    assert_eq!(config.rate_limit.on_backend_failure, FailurePolicy::Allow);
}

#[test]
fn test_unknown_failure_policy_is_rejected() {
    let result = config::Config::builder()
        .add_source(config::File::from_str(
            "[rate_limit]\non_backend_failure = \"sometimes\"",
            config::FileFormat::Toml,
        ))
        .build()
        .unwrap()
        .try_deserialize::<ServerConfig>();

    assert!(result.is_err());
}

#[test]
fn test_conventional_variables_override_file() {
    let mut config = from_toml(
        r#"
        port = 8080
        admin_api_key = "from-file"
        "#,
    );

    config
        .apply_overrides(|name| match name {
            "PORT" => Some("9090".to_string()),
            "ADMIN_API_KEY" => Some("from-env".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(config.port, 9090);
    assert_eq!(config.admin_api_key.as_deref(), Some("from-env"));
}
