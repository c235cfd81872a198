//! Field encryption adapters.

mod field_encryption;

pub use field_encryption::AesGcmFieldEncryptor;
