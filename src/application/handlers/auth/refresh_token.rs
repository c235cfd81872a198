//! RefreshTokenHandler - exchanges a refresh token for a new access token.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{TokenService, UserRepository};

/// Command to refresh an access token.
#[derive(Debug, Clone)]
pub struct RefreshTokenCommand {
    pub refresh_token: String,
}

/// Handler for the refresh flow.
pub struct RefreshTokenHandler {
    tokens: Arc<dyn TokenService>,
    users: Arc<dyn UserRepository>,
}

impl RefreshTokenHandler {
    pub fn new(tokens: Arc<dyn TokenService>, users: Arc<dyn UserRepository>) -> Self {
        Self { tokens, users }
    }

    pub async fn handle(&self, cmd: RefreshTokenCommand) -> Result<String, DomainError> {
        let user_id = self
            .tokens
            .validate_refresh(&cmd.refresh_token)
            .map_err(|_| DomainError::new(ErrorCode::TokenInvalid, "Token inválido"))?;

        // The account must still exist; a deleted user keeps a valid-looking
        // refresh token until expiry otherwise.
        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::TokenInvalid, "Token inválido"))?;

        self.tokens
            .issue_access(&user.id, user.phone.as_deref())
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Erro interno do servidor"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::auth::test_support::{MockTokenService, MockUserRepository};
    use crate::domain::foundation::Timestamp;
    use crate::domain::user::User;

    #[tokio::test]
    async fn valid_refresh_issues_access_token() {
        let users = Arc::new(MockUserRepository::new());
        let user = User::from_phone("+351912345678", "+351", Timestamp::now());
        let user_id = user.id;
        users.push(user);

        let handler = RefreshTokenHandler::new(Arc::new(MockTokenService::new()), users);
        let token = handler
            .handle(RefreshTokenCommand {
                refresh_token: format!("refresh-{}", user_id),
            })
            .await
            .unwrap();

        assert_eq!(token, format!("access-{}", user_id));
    }

    #[tokio::test]
    async fn garbage_refresh_token_rejected() {
        let handler = RefreshTokenHandler::new(
            Arc::new(MockTokenService::new()),
            Arc::new(MockUserRepository::new()),
        );
        let err = handler
            .handle(RefreshTokenCommand {
                refresh_token: "garbage".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }

    #[tokio::test]
    async fn refresh_for_deleted_user_rejected() {
        let handler = RefreshTokenHandler::new(
            Arc::new(MockTokenService::new()),
            Arc::new(MockUserRepository::new()),
        );
        let err = handler
            .handle(RefreshTokenCommand {
                refresh_token: format!("refresh-{}", crate::domain::foundation::UserId::new()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }
}
