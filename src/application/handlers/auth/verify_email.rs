//! VerifyEmailHandler - confirms an email signup code and logs the user in.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::subscription::Subscription;
use crate::domain::verification::{CodePurpose, CodeRecipient, VerificationOutcome};
use crate::ports::{
    SubscriptionRepository, TokenService, UserRepository, VerificationCodeRepository,
};

use super::AuthTokens;

/// Command to verify an email signup code.
#[derive(Debug, Clone)]
pub struct VerifyEmailCommand {
    pub email: String,
    pub code: String,
}

/// Handler for email verification.
pub struct VerifyEmailHandler {
    codes: Arc<dyn VerificationCodeRepository>,
    users: Arc<dyn UserRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    tokens: Arc<dyn TokenService>,
}

impl VerifyEmailHandler {
    pub fn new(
        codes: Arc<dyn VerificationCodeRepository>,
        users: Arc<dyn UserRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            codes,
            users,
            subscriptions,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: VerifyEmailCommand) -> Result<AuthTokens, DomainError> {
        let now = Timestamp::now();
        let recipient = CodeRecipient::Email(cmd.email.clone());

        let mut code = self
            .codes
            .find_latest_pending(&recipient, CodePurpose::EmailSignup, now)
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

        let first_verification = !user.email_verified;
        if first_verification {
            user.mark_email_verified(now);
            self.users.update(&user).await?;

            // First verification starts the trial, mirroring phone signup
            if self.subscriptions.find_by_user_id(&user.id).await?.is_none() {
                let trial = Subscription::start_trial(user.id, now);
                if let Err(err) = self.subscriptions.save(&trial).await {
                    tracing::error!(user_id = %user.id, error = %err, "Failed to create trial subscription");
                }
            }
        }

        let pair = self
            .tokens
            .issue_pair(&user.id, None)
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Erro interno do servidor"))?;

        Ok(AuthTokens {
            token: pair.access_token,
            refresh_token: pair.refresh_token,
            is_new_user: first_verification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::auth::test_support::{
        MockCodeRepository, MockSubscriptionRepository, MockTokenService, MockUserRepository,
    };
    use crate::domain::subscription::SubscriptionPlan;
    use crate::domain::user::User;
    use crate::domain::verification::VerificationCode;

    fn setup() -> (
        Arc<MockCodeRepository>,
        Arc<MockUserRepository>,
        Arc<MockSubscriptionRepository>,
        VerifyEmailHandler,
    ) {
        let codes = Arc::new(MockCodeRepository::new());
        let users = Arc::new(MockUserRepository::new());
        let subscriptions = Arc::new(MockSubscriptionRepository::new());
        let handler = VerifyEmailHandler::new(
            codes.clone(),
            users.clone(),
            subscriptions.clone(),
            Arc::new(MockTokenService::new()),
        );
        (codes, users, subscriptions, handler)
    }

    fn issue(codes: &MockCodeRepository, email: &str, plaintext: &str) {
        codes.push(VerificationCode::issue(
            CodeRecipient::Email(email.to_string()),
            CodePurpose::EmailSignup,
            plaintext,
            Timestamp::now(),
        ));
    }

    #[tokio::test]
    async fn verification_marks_email_and_starts_trial() {
        let (codes, users, subscriptions, handler) = setup();
        users.push(User::from_email("ana@example.com", "hash", Timestamp::now()));
        issue(&codes, "ana@example.com", "123456");

        let result = handler
            .handle(VerifyEmailCommand {
                email: "ana@example.com".to_string(),
                code: "123456".to_string(),
            })
            .await
            .unwrap();

        assert!(result.is_new_user);
        assert!(users.stored()[0].email_verified);

        let subs = subscriptions.stored();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].plan, SubscriptionPlan::FreeTrial);
    }

    #[tokio::test]
    async fn password_reset_code_does_not_verify_email() {
        let (codes, users, _, handler) = setup();
        users.push(User::from_email("ana@example.com", "hash", Timestamp::now()));

        // a reset code for the same address must not satisfy signup checks
        codes.push(VerificationCode::issue(
            CodeRecipient::Email("ana@example.com".to_string()),
            CodePurpose::PasswordReset,
            "123456",
            Timestamp::now(),
        ));

        let err = handler
            .handle(VerifyEmailCommand {
                email: "ana@example.com".to_string(),
                code: "123456".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::CodeExpired);
    }

    #[tokio::test]
    async fn second_verification_does_not_duplicate_trial() {
        let (codes, users, subscriptions, handler) = setup();
        users.push(User::from_email("ana@example.com", "hash", Timestamp::now()));

        issue(&codes, "ana@example.com", "111111");
        handler
            .handle(VerifyEmailCommand {
                email: "ana@example.com".to_string(),
                code: "111111".to_string(),
            })
            .await
            .unwrap();

        issue(&codes, "ana@example.com", "222222");
        let second = handler
            .handle(VerifyEmailCommand {
                email: "ana@example.com".to_string(),
                code: "222222".to_string(),
            })
            .await
            .unwrap();

        assert!(!second.is_new_user);
        assert_eq!(subscriptions.stored().len(), 1);
    }
}
