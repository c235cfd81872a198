//! Field encryption configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for the at-rest field encryption key.
///
/// The first 32 bytes of the key material are used as the AES-256-GCM key.
#[derive(Debug, Clone, Deserialize)]
pub struct EncryptionConfig {
    /// Key material, at least 32 characters
    pub key: Secret<String>,
}

impl EncryptionConfig {
    /// Returns the 32-byte AES key derived from the configured material
    pub fn key_bytes(&self) -> [u8; 32] {
        let mut key = [0u8; 32];
        key.copy_from_slice(&self.key.expose_secret().as_bytes()[..32]);
        key
    }

    /// Validate encryption configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.key.expose_secret().len() < 32 {
            return Err(ValidationError::EncryptionKeyTooShort);
        }
        Ok(())
    }
}
