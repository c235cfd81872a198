//! Authentication configuration (JWT secrets and token lifetimes)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign access tokens (HS256)
    pub jwt_secret: Secret<String>,

    /// Secret used to sign refresh tokens (HS256), must differ from `jwt_secret`
    pub jwt_refresh_secret: Secret<String>,

    /// Access token lifetime in minutes
    #[serde(default = "default_access_ttl_minutes")]
    pub access_ttl_minutes: u64,

    /// Refresh token lifetime in days
    #[serde(default = "default_refresh_ttl_days")]
    pub refresh_ttl_days: u64,
}

impl AuthConfig {
    /// Expose the access token secret for signing/verification
    pub fn jwt_secret(&self) -> &str {
        self.jwt_secret.expose_secret()
    }

    /// Expose the refresh token secret for signing/verification
    pub fn jwt_refresh_secret(&self) -> &str {
        self.jwt_refresh_secret.expose_secret()
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.jwt_secret.expose_secret().len() < 32
            || self.jwt_refresh_secret.expose_secret().len() < 32
        {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if self.jwt_secret.expose_secret() == self.jwt_refresh_secret.expose_secret() {
            return Err(ValidationError::JwtSecretsIdentical);
        }
        Ok(())
    }
}

fn default_access_ttl_minutes() -> u64 {
    15
}

fn default_refresh_ttl_days() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(access: &str, refresh: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: Secret::new(access.to_string()),
            jwt_refresh_secret: Secret::new(refresh.to_string()),
            access_ttl_minutes: default_access_ttl_minutes(),
            refresh_ttl_days: default_refresh_ttl_days(),
        }
    }

    #[test]
    fn test_valid_config() {
        let c = config(
            "0123456789abcdef0123456789abcdef",
            "fedcba9876543210fedcba9876543210",
        );
        assert!(c.validate().is_ok());
        assert_eq!(c.access_ttl_minutes, 15);
        assert_eq!(c.refresh_ttl_days, 30);
    }

    #[test]
    fn test_short_secret_rejected() {
        let c = config("short", "fedcba9876543210fedcba9876543210");
        assert!(matches!(
            c.validate(),
            Err(ValidationError::JwtSecretTooShort)
        ));
    }

    #[test]
    fn test_identical_secrets_rejected() {
        let c = config(
            "0123456789abcdef0123456789abcdef",
            "0123456789abcdef0123456789abcdef",
        );
        assert!(matches!(
            c.validate(),
            Err(ValidationError::JwtSecretsIdentical)
        ));
    }
}
