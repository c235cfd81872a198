//! Session token port - issuing and validating signed tokens.

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};

/// An issued access/refresh token pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Port for session token issuance and validation.
pub trait TokenService: Send + Sync {
    /// Issues an access/refresh pair for a user.
    fn issue_pair(&self, user_id: &UserId, phone: Option<&str>) -> Result<TokenPair, AuthError>;

    /// Issues a fresh access token (refresh flow).
    fn issue_access(&self, user_id: &UserId, phone: Option<&str>) -> Result<String, AuthError>;

    /// Validates an access token and returns the authenticated identity.
    fn validate_access(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;

    /// Validates a refresh token and returns the user id it was issued to.
    fn validate_refresh(&self, token: &str) -> Result<UserId, AuthError>;
}
