//! Field-level encryption port for data encrypted at rest.

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors from the field encryption layer.
#[derive(Debug, thiserror::Error)]
pub enum EncryptionError {
    #[error("encryption failed")]
    EncryptFailed,

    #[error("decryption failed")]
    DecryptFailed,

    #[error("ciphertext malformed")]
    Malformed,
}

impl From<EncryptionError> for DomainError {
    fn from(err: EncryptionError) -> Self {
        DomainError::new(ErrorCode::EncryptionFailed, err.to_string())
    }
}

/// Port for encrypting single profile fields before storage.
///
/// Implementations must be deterministic-free: each `encrypt` call uses a
/// fresh nonce, so equal plaintexts produce different ciphertexts.
pub trait FieldEncryptor: Send + Sync {
    /// Encrypts a plaintext field, returning an opaque encoded string.
    fn encrypt(&self, plaintext: &str) -> Result<String, EncryptionError>;

    /// Decrypts a string produced by `encrypt`.
    fn decrypt(&self, ciphertext: &str) -> Result<String, EncryptionError>;
}
