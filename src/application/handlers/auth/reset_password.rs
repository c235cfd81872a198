//! ResetPasswordHandler - sets a new password after code verification.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::verification::{CodePurpose, CodeRecipient, VerificationOutcome};
use crate::ports::{UserRepository, VerificationCodeRepository};

use super::hash_password;

/// Command to reset a password with a verification code.
#[derive(Debug, Clone)]
pub struct ResetPasswordCommand {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

/// Handler for password reset.
pub struct ResetPasswordHandler {
    codes: Arc<dyn VerificationCodeRepository>,
    users: Arc<dyn UserRepository>,
}

impl ResetPasswordHandler {
    pub fn new(
        codes: Arc<dyn VerificationCodeRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self { codes, users }
    }

    pub async fn handle(&self, cmd: ResetPasswordCommand) -> Result<(), DomainError> {
        if cmd.new_password.len() < 6 {
            return Err(DomainError::validation(
                "newPassword",
                "A senha deve ter pelo menos 6 caracteres",
            ));
        }

        let now = Timestamp::now();
        let recipient = CodeRecipient::Email(cmd.email.clone());

        let mut code = self
            .codes
            .find_latest_pending(&recipient, CodePurpose::PasswordReset, now)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::CodeExpired,
                    "Código expirado. Solicite um novo código.",
                )
            })?;

        let outcome = code.verify(&cmd.code, now);
        self.codes.update(&code).await?;

        match outcome {
            VerificationOutcome::Verified => {}
            VerificationOutcome::WrongCode { .. } => {
                return Err(DomainError::new(ErrorCode::CodeInvalid, "Código inválido"));
            }
            VerificationOutcome::AttemptsExhausted => {
                return Err(DomainError::new(
                    ErrorCode::TooManyAttempts,
                    "Muitas tentativas. Solicite um novo código.",
                ));
            }
        }

        let mut user = self
            .users
            .find_by_email(&cmd.email)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "Usuário não encontrado"))?;

        user.password_hash = Some(hash_password(&cmd.new_password)?);
        user.updated_at = now;
        self.users.update(&user).await?;

        tracing::info!(user_id = %user.id, "Password reset completed");
        Ok(())
    }
}
