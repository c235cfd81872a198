//! EmailLoginHandler - password login for verified email accounts.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{TokenService, UserRepository};

use super::{verify_password, AuthTokens};

/// Command to log in with email and password.
#[derive(Debug, Clone)]
pub struct EmailLoginCommand {
    pub email: String,
    pub password: String,
}

/// Handler for email/password login.
pub struct EmailLoginHandler {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenService>,
}

impl EmailLoginHandler {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self { users, tokens }
    }

    pub async fn handle(&self, cmd: EmailLoginCommand) -> Result<AuthTokens, DomainError> {
        // The same error covers unknown address and wrong password so the
        // endpoint does not leak which addresses exist.
        let invalid =
            || DomainError::new(ErrorCode::InvalidCredentials, "E-mail ou senha inválidos");

        let user = self
            .users
            .find_by_email(&cmd.email)
            .await?
            .ok_or_else(invalid)?;

        let password_hash = user.password_hash.as_ref().ok_or_else(invalid)?;
        if !verify_password(password_hash, &cmd.password)? {
            return Err(invalid());
        }

        if !user.email_verified {
            return Err(DomainError::new(
                ErrorCode::EmailNotVerified,
                "Verifique seu e-mail primeiro",
            ));
        }

        let pair = self
            .tokens
            .issue_pair(&user.id, user.phone.as_deref())
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Erro interno do servidor"))?;

        Ok(AuthTokens {
            token: pair.access_token,
            refresh_token: pair.refresh_token,
            is_new_user: false,
        })
    }
}
