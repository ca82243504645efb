//! Rate limiting middleware

use super::types::AppState;
use crate::error::ServerError;
use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use chapterboard_cache::RateLimitDecision;
use std::net::{IpAddr, SocketAddr};

/// Address used to key a client's rate limit budget.
///
/// Uses the TCP peer address; with `trust_forwarded_for`, the first
/// X-Forwarded-For entry or X-Real-IP takes precedence.
pub fn client_address(request: &Request, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        if let Some(ip) = forwarded_ip(request) {
            return ip.to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn forwarded_ip(request: &Request) -> Option<IpAddr> {
    let header = |name: &str| request.headers().get(name).and_then(|h| h.to_str().ok());

    // X-Forwarded-For can contain multiple IPs, take the first one
    if let Some(ip) = header("x-forwarded-for")
        .and_then(|list| list.split(',').next())
        .and_then(|first| first.trim().parse().ok())
    {
        return Some(ip);
    }

    header("x-real-ip").and_then(|ip| ip.trim().parse().ok())
}

/// Consume one point per request; over budget answers 429
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    // Skip if rate limiting is disabled
    if !state.rate_limit.enabled {
        return Ok(next.run(request).await);
    }

    let client = client_address(&request, state.rate_limit.trust_forwarded_for);

    match state.limiter.consume(&client).await {
        RateLimitDecision::Allowed { .. } | RateLimitDecision::Bypassed => {
            Ok(next.run(request).await)
        }
        RateLimitDecision::Limited { .. } | RateLimitDecision::Unavailable => {
            Err(ServerError::RateLimited)
        }
    }
}
