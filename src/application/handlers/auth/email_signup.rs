//! EmailSignupHandler - creates an email/password account awaiting
//! verification.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::user::User;
use crate::domain::verification::{
    CodePurpose, CodeRecipient, VerificationCode, MAX_CODES_PER_HOUR,
};
use crate::ports::{EmailSender, UserRepository, VerificationCodeRepository};

use super::{generate_code, hash_password, is_valid_email};

/// Command to sign up with email and password.
#[derive(Debug, Clone)]
pub struct EmailSignupCommand {
    pub email: String,
    pub password: String,
}

/// Handler for email signup.
///
/// A signup for an address that already belongs to an unverified account
/// replaces its password and sends a fresh code; a verified account is
/// rejected.
pub struct EmailSignupHandler {
    users: Arc<dyn UserRepository>,
    codes: Arc<dyn VerificationCodeRepository>,
    email: Arc<dyn EmailSender>,
    development_mode: bool,
}

impl EmailSignupHandler {
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

    pub async fn handle(&self, cmd: EmailSignupCommand) -> Result<(), DomainError> {
        if !is_valid_email(&cmd.email) {
            return Err(DomainError::validation("email", "E-mail inválido"));
        }
        if cmd.password.len() < 6 {
            return Err(DomainError::validation(
                "password",
                "A senha deve ter pelo menos 6 caracteres",
            ));
        }

        let now = Timestamp::now();
        let password_hash = hash_password(&cmd.password)?;

        match self.users.find_by_email(&cmd.email).await? {
            Some(existing) if existing.email_verified => {
                return Err(DomainError::validation("email", "E-mail já registado"));
            }
            Some(mut existing) => {
                existing.password_hash = Some(password_hash);
                self.users.update(&existing).await?;
            }
            None => {
                let user = User::from_email(&cmd.email, password_hash, now);
                self.users.save(&user).await?;
            }
        }

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
        let code = VerificationCode::issue(recipient, CodePurpose::EmailSignup, &plaintext, now);
        self.codes.save(&code).await?;

        if let Err(err) = self.email.send_verification_code(&cmd.email, &plaintext).await {
            if self.development_mode {
                tracing::warn!(
                    email = %cmd.email,
                    code = %plaintext,
                    error = %err,
                    "Development mode - email failed, logging verification code"
                );
                return Ok(());
            }
            return Err(err.into());
        }

        Ok(())
    }
}
