//! SMS delivery port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors delivering a message through an out-of-band channel.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The provider is not configured (development without credentials).
    #[error("delivery provider not configured")]
    NotConfigured,

    #[error("network error: {0}")]
    Network(String),

    #[error("provider error ({status}): {message}")]
    Provider { status: u16, message: String },
}

impl From<DeliveryError> for DomainError {
    fn from(err: DeliveryError) -> Self {
        tracing::error!(error = %err, "Message delivery failed");
        DomainError::new(ErrorCode::DeliveryFailed, "Falha ao enviar mensagem. Tente novamente.")
    }
}

/// Port for sending verification codes over SMS.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Sends a verification code to a phone number.
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<(), DeliveryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_error_maps_to_delivery_failed() {
        let err: DomainError = DeliveryError::NotConfigured.into();
        assert_eq!(err.code, ErrorCode::DeliveryFailed);
    }
}
