//! Password hashing with scrypt.
//!
//! Output format: `hex(salt):hex(key)` with a random 16-byte salt and a
//! 64-byte derived key (N=16384, r=16, p=1).

use rand::RngCore;
use scrypt::{scrypt, Params};
use subtle::ConstantTimeEq;

use crate::domain::foundation::{DomainError, ErrorCode};

const SALT_LEN: usize = 16;
const KEY_LEN: usize = 64;

/// Hashes a password for storage.
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let key = derive_key(password, &salt)?;
    Ok(format!("{}:{}", hex::encode(salt), hex::encode(key)))
}

/// Verifies a password against a hash produced by [`hash_password`].
pub fn verify_password(hash: &str, password: &str) -> Result<bool, DomainError> {
    let (salt_hex, key_hex) = hash.split_once(':').ok_or_else(|| {
        DomainError::new(ErrorCode::InternalError, "Invalid password hash format")
    })?;

    let salt = hex::decode(salt_hex)
        .map_err(|_| DomainError::new(ErrorCode::InternalError, "Invalid password hash salt"))?;
    let expected = hex::decode(key_hex)
        .map_err(|_| DomainError::new(ErrorCode::InternalError, "Invalid password hash key"))?;

    let derived = derive_key(password, &salt)?;
    Ok(derived.ct_eq(&expected).into())
}

fn derive_key(password: &str, salt: &[u8]) -> Result<Vec<u8>, DomainError> {
    // N=16384 -> log2 = 14
    let params = Params::new(14, 16, 1, KEY_LEN)
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("scrypt params: {}", e)))?;

    let mut key = vec![0u8; KEY_LEN];
    scrypt(password.as_bytes(), salt, &params, &mut key)
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("scrypt: {}", e)))?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password(&hash, "correct horse battery staple").unwrap());
        assert!(!verify_password(&hash, "wrong password").unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("not-a-valid-hash", "pw").is_err());
    }
}
