//! JWT implementation of the TokenService port.
//!
//! HS256 with separate secrets for access and refresh tokens. Access tokens
//! carry the optional phone claim; refresh tokens carry only the subject.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::{TokenPair, TokenService};

#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct RefreshClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// JWT token service.
pub struct JwtTokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl_minutes: u64,
    refresh_ttl_days: u64,
}

impl JwtTokenService {
    /// Creates a token service from the auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.jwt_secret().as_bytes()),
            access_decoding: DecodingKey::from_secret(config.jwt_secret().as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.jwt_refresh_secret().as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.jwt_refresh_secret().as_bytes()),
            access_ttl_minutes: config.access_ttl_minutes,
            refresh_ttl_days: config.refresh_ttl_days,
        }
    }

    fn map_decode_error(err: jsonwebtoken::errors::Error) -> AuthError {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue_pair(&self, user_id: &UserId, phone: Option<&str>) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: self.issue_access(user_id, phone)?,
            refresh_token: {
                let now = chrono::Utc::now().timestamp();
                let claims = RefreshClaims {
                    sub: user_id.to_string(),
                    iat: now,
                    exp: now + (self.refresh_ttl_days as i64) * 24 * 60 * 60,
                };
                encode(&Header::default(), &claims, &self.refresh_encoding)
                    .map_err(|_| AuthError::InvalidToken)?
            },
        })
    }

    fn issue_access(&self, user_id: &UserId, phone: Option<&str>) -> Result<String, AuthError> {
        let now = chrono::Utc::now().timestamp();
        let claims = AccessClaims {
            sub: user_id.to_string(),
            phone: phone.map(String::from),
            iat: now,
            exp: now + (self.access_ttl_minutes as i64) * 60,
        };
        encode(&Header::default(), &claims, &self.access_encoding)
            .map_err(|_| AuthError::InvalidToken)
    }

    fn validate_access(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<AccessClaims>(token, &self.access_decoding, &Validation::default())
            .map_err(Self::map_decode_error)?;

        let user_id: UserId = data
            .claims
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthenticatedUser::new(user_id, data.claims.phone))
    }

    fn validate_refresh(&self, token: &str) -> Result<UserId, AuthError> {
        let data = decode::<RefreshClaims>(token, &self.refresh_decoding, &Validation::default())
            .map_err(Self::map_decode_error)?;

        data.claims.sub.parse().map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn service() -> JwtTokenService {
        JwtTokenService::new(&AuthConfig {
            jwt_secret: Secret::new("0123456789abcdef0123456789abcdef".to_string()),
            jwt_refresh_secret: Secret::new("fedcba9876543210fedcba9876543210".to_string()),
            access_ttl_minutes: 15,
            refresh_ttl_days: 30,
        })
    }

    #[test]
    fn issued_access_token_validates() {
        let service = service();
        let user_id = UserId::new();

        let pair = service
            .issue_pair(&user_id, Some("+351912345678"))
            .unwrap();
        let user = service.validate_access(&pair.access_token).unwrap();

        assert_eq!(user.user_id, user_id);
        assert_eq!(user.phone.as_deref(), Some("+351912345678"));
    }

    #[test]
    fn issued_refresh_token_validates() {
        let service = service();
        let user_id = UserId::new();

        let pair = service.issue_pair(&user_id, None).unwrap();
        assert_eq!(service.validate_refresh(&pair.refresh_token).unwrap(), user_id);
    }

    #[test]
    fn access_token_is_not_a_refresh_token() {
        let service = service();
        let pair = service.issue_pair(&UserId::new(), None).unwrap();

        // different signing secrets: tokens are not interchangeable
        assert!(service.validate_refresh(&pair.access_token).is_err());
        assert!(service.validate_access(&pair.refresh_token).is_err());
    }

    #[test]
    fn garbage_token_rejected() {
        let service = service();
        assert!(matches!(
            service.validate_access("not.a.jwt"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn expired_token_reports_expiry() {
        let service = service();
        let now = chrono::Utc::now().timestamp();
        let claims = AccessClaims {
            sub: UserId::new().to_string(),
            phone: None,
            iat: now - 3600,
            exp: now - 1800,
        };
        let token = encode(&Header::default(), &claims, &service.access_encoding).unwrap();

        assert!(matches!(
            service.validate_access(&token),
            Err(AuthError::TokenExpired)
        ));
    }
}
