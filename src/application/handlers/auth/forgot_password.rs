//! ForgotPasswordHandler - issues a password reset code.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::verification::{
    CodePurpose, CodeRecipient, VerificationCode, MAX_CODES_PER_HOUR,
};
use crate::ports::{EmailSender, UserRepository, VerificationCodeRepository};

use super::generate_code;

/// Command to request a password reset.
#[derive(Debug, Clone)]
pub struct ForgotPasswordCommand {
    pub email: String,
}

/// Handler for password reset requests.
///
/// Succeeds whether or not the address exists, so the endpoint cannot be
/// used to enumerate accounts. Rate limiting still applies to addresses
/// that do exist.
pub struct ForgotPasswordHandler {
    users: Arc<dyn UserRepository>,
    codes: Arc<dyn VerificationCodeRepository>,
    email: Arc<dyn EmailSender>,
    development_mode: bool,
}

impl ForgotPasswordHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        codes: Arc<dyn VerificationCodeRepository>,
        email: Arc<dyn EmailSender>,
        development_mode: bool,
    ) -> Self {
        Self {
            users,
            codes,
            email,
            development_mode,
        }
    }

    pub async fn handle(&self, cmd: ForgotPasswordCommand) -> Result<(), DomainError> {
        let user = match self.users.find_by_email(&cmd.email).await? {
            Some(user) => user,
            None => {
                tracing::debug!("Password reset requested for unknown address");
                return Ok(());
            }
        };

        let now = Timestamp::now();
        let recipient = CodeRecipient::Email(cmd.email.clone());

        let issued_last_hour = self
            .codes
            .count_issued_since(&recipient, now.minus_hours(1))
            .await?;
        if issued_last_hour >= MAX_CODES_PER_HOUR {
            return Err(DomainError::new(
                ErrorCode::RateLimited,
                "Muitos pedidos de código. Tente novamente mais tarde.",
            ));
        }

        let plaintext = generate_code();
        let code = VerificationCode::issue(recipient, CodePurpose::PasswordReset, &plaintext, now);
        self.codes.save(&code).await?;

        if let Err(err) = self
            .email
            .send_password_reset_code(&cmd.email, &plaintext)
            .await
        {
            if self.development_mode {
                tracing::warn!(
                    email = %cmd.email,
                    code = %plaintext,
                    error = %err,
                    "Development mode - email failed, logging reset code"
                );
                return Ok(());
            }
            return Err(err.into());
        }

        tracing::info!(user_id = %user.id, "Password reset code sent");
        Ok(())
    }
}
