//! Request rate limiting port.

use async_trait::async_trait;

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// The request may proceed.
    Allowed,
    /// The request is over the window limit.
    Limited {
        /// Seconds until the window resets.
        retry_after_secs: u64,
    },
}

impl RateLimitDecision {
    /// Returns true if the request may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed)
    }
}

/// Port for per-key request rate limiting (keyed by client IP).
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Records a hit for the key and decides whether it may proceed.
    async fn check(&self, key: &str) -> RateLimitDecision;
}
