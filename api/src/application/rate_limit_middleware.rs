use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, header::RETRY_AFTER},
    middleware::Next,
    response::Response,
};
use labeliq_core::domain::rate_limit::RateLimitDecision;
use tracing::warn;

use crate::application::http::server::{api_entities::api_error::ApiError, app_state::AppState};

pub const RATELIMIT_POLICY: HeaderName = HeaderName::from_static("ratelimit-policy");
pub const RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("ratelimit-limit");
pub const RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("ratelimit-remaining");
pub const RATELIMIT_RESET: HeaderName = HeaderName::from_static("ratelimit-reset");

const UNKNOWN_CLIENT: &str = "unknown";

/// Counts every request against its client's window and rejects the ones
/// over the cap before they reach validation or the provider.
pub async fn rate_limit(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let client = client_key(&req, state.args.rate_limit.trust_proxy);
    let decision = state.rate_limiter.check(&client);

    if !decision.allowed {
        warn!(client = %client, "rate limit exceeded");
        return Err(ApiError::TooManyRequests {
            retry_after_secs: decision.reset_after_secs(),
            decision: Some(decision),
        });
    }

    let mut response = next.run(req).await;
    insert_rate_limit_headers(response.headers_mut(), &decision);
    Ok(response)
}

/// The socket peer address. Behind a trusted proxy the first
/// `X-Forwarded-For` hop, then `X-Real-IP`, take precedence.
pub fn client_key(req: &Request, trust_proxy: bool) -> String {
    if trust_proxy {
        if let Some(ip) = forwarded_client(req.headers()) {
            return ip;
        }
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

fn forwarded_client(headers: &HeaderMap) -> Option<String> {
    if let Some(ip) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        return Some(ip.to_string());
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn insert_rate_limit_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    if let Ok(policy) = HeaderValue::from_str(&decision.policy()) {
        headers.insert(RATELIMIT_POLICY, policy);
    }
    headers.insert(RATELIMIT_LIMIT, HeaderValue::from(decision.limit));
    headers.insert(RATELIMIT_REMAINING, HeaderValue::from(decision.remaining));
    headers.insert(RATELIMIT_RESET, HeaderValue::from(decision.reset_after_secs()));
}

pub fn insert_retry_after(headers: &mut HeaderMap, retry_after_secs: u64) {
    headers.insert(RETRY_AFTER, HeaderValue::from(retry_after_secs));
}
