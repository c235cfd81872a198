//! VerifyPhoneCodeHandler - checks a one-time code and logs the user in.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::subscription::Subscription;
use crate::domain::user::User;
use crate::domain::verification::{CodePurpose, CodeRecipient, VerificationOutcome};
use crate::ports::{
    SubscriptionRepository, TokenService, UserRepository, VerificationCodeRepository,
};

/// Command to verify a phone code.
#[derive(Debug, Clone)]
pub struct VerifyPhoneCodeCommand {
    pub phone: String,
    pub code: String,
}

/// Issued tokens plus whether the account was created by this login.
#[derive(Debug, Clone)]
pub struct AuthTokens {
    pub token: String,
    pub refresh_token: String,
    pub is_new_user: bool,
}

/// Handler for phone code verification and login.
pub struct VerifyPhoneCodeHandler {
    codes: Arc<dyn VerificationCodeRepository>,
    users: Arc<dyn UserRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    tokens: Arc<dyn TokenService>,
    default_country_code: String,
}

impl VerifyPhoneCodeHandler {
    pub fn new(
        codes: Arc<dyn VerificationCodeRepository>,
        users: Arc<dyn UserRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        tokens: Arc<dyn TokenService>,
        default_country_code: impl Into<String>,
    ) -> Self {
        Self {
            codes,
            users,
            subscriptions,
            tokens,
            default_country_code: default_country_code.into(),
        }
    }

    pub async fn handle(&self, cmd: VerifyPhoneCodeCommand) -> Result<AuthTokens, DomainError> {
        let now = Timestamp::now();
        let recipient = CodeRecipient::Phone(cmd.phone.clone());

        // Only the newest pending code is ever checked; older unexpired
        // codes are shadowed by reissue.
        let mut code = self
            .codes
            .find_latest_pending(&recipient, CodePurpose::PhoneLogin, now)
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

        let (user, is_new_user) = match self.users.find_by_phone(&cmd.phone).await? {
            Some(user) => (user, false),
            None => {
                let user = User::from_phone(&cmd.phone, &self.default_country_code, now);
                self.users.save(&user).await?;

                // A failed trial creation is logged but does not block the
                // login; the subscription can be backfilled later.
                let trial = Subscription::start_trial(user.id, now);
                if let Err(err) = self.subscriptions.save(&trial).await {
                    tracing::error!(user_id = %user.id, error = %err, "Failed to create trial subscription");
                }

                tracing::info!(user_id = %user.id, "New user created with trial subscription");
                (user, true)
            }
        };

        let pair = self
            .tokens
            .issue_pair(&user.id, user.phone.as_deref())
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Erro interno do servidor"))?;

        Ok(AuthTokens {
            token: pair.access_token,
            refresh_token: pair.refresh_token,
            is_new_user,
        })
    }
}
