//! SMS configuration (Twilio)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// SMS provider configuration.
///
/// Optional in development (codes are logged instead of sent); required in
/// production so the verification flow cannot be silently bypassed.
#[derive(Debug, Clone, Deserialize)]
pub struct SmsConfig {
    /// Twilio account SID
    pub twilio_account_sid: Option<String>,

    /// Twilio auth token
    pub twilio_auth_token: Option<Secret<String>>,

    /// Sender phone number (E.164)
    pub twilio_from_number: Option<String>,

    /// Base URL for the Twilio API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default country code prepended to national numbers
    #[serde(default = "default_country_code")]
    pub default_country_code: String,
}

impl SmsConfig {
    /// Returns true when all Twilio credentials are present
    pub fn is_configured(&self) -> bool {
        self.twilio_account_sid.is_some()
            && self.twilio_auth_token.is_some()
            && self.twilio_from_number.is_some()
    }

    /// Expose the auth token for making requests
    pub fn auth_token(&self) -> Option<&str> {
        self.twilio_auth_token.as_ref().map(|t| t.expose_secret().as_str())
    }

    /// Validate SMS configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if *environment == Environment::Production && !self.is_configured() {
            return Err(ValidationError::SmsCredentialsRequired);
        }
        Ok(())
    }
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            twilio_account_sid: None,
            twilio_auth_token: None,
            twilio_from_number: None,
            base_url: default_base_url(),
            default_country_code: default_country_code(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.twilio.com".to_string()
}

fn default_country_code() -> String {
    "+351".to_string()
}
