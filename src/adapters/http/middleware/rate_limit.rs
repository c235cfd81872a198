//! Per-IP request rate limiting middleware.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::ports::{RateLimitDecision, RateLimiter};

/// Middleware state: the limiter shared across requests.
pub type RateLimitState = Arc<dyn RateLimiter>;

/// Rejects requests over the per-IP window limit with 429.
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request);

    match limiter.check(&key).await {
        RateLimitDecision::Allowed => next.run(request).await,
        RateLimitDecision::Limited { retry_after_secs } => {
            tracing::warn!(client = %key, "Request rate limited");
            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({
                    "error": "RATE_LIMITED",
                    "message": "Muitas requisições deste IP. Tente novamente mais tarde.",
                    "statusCode": 429,
                })),
            )
                .into_response();
            if let Ok(value) = retry_after_secs.to_string().parse() {
                response.headers_mut().insert("Retry-After", value);
            }
            response
        }
    }
}

/// Derives the limiter key from the peer address, preferring the
/// first `X-Forwarded-For` hop when behind a proxy.
fn client_key(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return forwarded.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwarded_header_wins() {
        let request = Request::builder()
            .uri("/")
            .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(client_key(&request), "203.0.113.9");
    }

    #[test]
    fn falls_back_to_connect_info() {
        let mut request = Request::builder()
            .uri("/")
            .body(axum::body::Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo::<SocketAddr>("198.51.100.7:443".parse().unwrap()));
        assert_eq!(client_key(&request), "198.51.100.7");
    }

    #[test]
    fn unknown_without_any_source() {
        let request = Request::builder()
            .uri("/")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(client_key(&request), "unknown");
    }
}
