//! Webhook verification and processing errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised while verifying or decoding a Stripe webhook delivery.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WebhookError {
    /// The signature did not match the payload.
    #[error("invalid webhook signature")]
    InvalidSignature,

    /// The event is older than the acceptance window.
    #[error("webhook timestamp outside acceptance window")]
    TimestampOutOfRange,

    /// The event timestamp is too far in the future.
    #[error("webhook timestamp in the future")]
    InvalidTimestamp,

    /// The signature header or payload could not be parsed.
    #[error("webhook parse error: {0}")]
    ParseError(String),
}

impl From<WebhookError> for DomainError {
    fn from(err: WebhookError) -> Self {
        DomainError::new(ErrorCode::WebhookInvalid, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webhook_error_displays() {
        assert_eq!(
            WebhookError::InvalidSignature.to_string(),
            "invalid webhook signature"
        );
        assert_eq!(
            WebhookError::ParseError("bad hex".to_string()).to_string(),
            "webhook parse error: bad hex"
        );
    }

    #[test]
    fn webhook_error_maps_to_domain_error() {
        let err: DomainError = WebhookError::InvalidSignature.into();
        assert_eq!(err.code, ErrorCode::WebhookInvalid);
    }
}
