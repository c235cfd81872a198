//! Email configuration (Resend)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Email provider configuration.
///
/// Optional in development (codes are logged instead of sent); required in
/// production.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key
    pub resend_api_key: Option<Secret<String>>,

    /// Base URL for the Resend API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// From address for outgoing mail
    #[serde(default = "default_from_address")]
    pub from_address: String,
}

impl EmailConfig {
    /// Returns true when the provider credentials are present
    pub fn is_configured(&self) -> bool {
        self.resend_api_key.is_some()
    }

    /// Expose the API key for making requests
    pub fn api_key(&self) -> Option<&str> {
        self.resend_api_key.as_ref().map(|k| k.expose_secret().as_str())
    }

    /// Validate email configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if *environment == Environment::Production && !self.is_configured() {
            return Err(ValidationError::EmailCredentialsRequired);
        }
        if !self.from_address.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: None,
            base_url: default_base_url(),
            from_address: default_from_address(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.resend.com".to_string()
}

fn default_from_address() -> String {
    "FitAI <no-reply@fitai.app>".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_allowed_in_development() {
        let c = EmailConfig::default();
        assert!(c.validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_unconfigured_rejected_in_production() {
        let c = EmailConfig::default();
        assert!(matches!(
            c.validate(&Environment::Production),
            Err(ValidationError::EmailCredentialsRequired)
        ));
    }

    #[test]
    fn test_invalid_from_address_rejected() {
        let c = EmailConfig {
            from_address: "not-an-address".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            c.validate(&Environment::Development),
            Err(ValidationError::InvalidFromEmail)
        ));
    }
}
