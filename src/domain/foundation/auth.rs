//! Authenticated user context and authentication errors.

use thiserror::Error;

use super::UserId;

/// Identity extracted from a validated access token.
///
/// Injected into request extensions by the auth middleware and read back by
/// handler extractors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The authenticated user's id.
    pub user_id: UserId,
    /// Phone number claim, present for phone-authenticated users.
    pub phone: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user context.
    pub fn new(user_id: UserId, phone: Option<String>) -> Self {
        Self { user_id, phone }
    }
}

/// Authentication failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The token's expiry has passed.
    #[error("token expired")]
    TokenExpired,

    /// The token failed signature or claim validation.
    #[error("invalid token")]
    InvalidToken,

    /// No token was supplied where one is required.
    #[error("authentication required")]
    MissingToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_user_holds_claims() {
        let id = UserId::new();
        let user = AuthenticatedUser::new(id, Some("+351912345678".to_string()));
        assert_eq!(user.user_id, id);
        assert_eq!(user.phone.as_deref(), Some("+351912345678"));
    }

    #[test]
    fn auth_error_displays() {
        assert_eq!(AuthError::TokenExpired.to_string(), "token expired");
        assert_eq!(AuthError::InvalidToken.to_string(), "invalid token");
    }
}
