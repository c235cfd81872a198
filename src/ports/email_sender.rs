//! Email delivery port.

use async_trait::async_trait;

use super::sms_sender::DeliveryError;

/// Port for sending verification and password reset codes over email.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sends an email verification code.
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), DeliveryError>;

    /// Sends a password reset code.
    async fn send_password_reset_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<(), DeliveryError>;
}
