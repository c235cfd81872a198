//! AES-256-GCM implementation of the FieldEncryptor port.
//!
//! Wire format: base64(nonce || ciphertext || tag) with a fresh random
//! 96-bit nonce per encryption. A given plaintext therefore never produces
//! the same ciphertext twice.

use base64::Engine;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM, NONCE_LEN};
use ring::rand::{SecureRandom, SystemRandom};

use crate::ports::{EncryptionError, FieldEncryptor};

/// AES-256-GCM field encryptor.
pub struct AesGcmFieldEncryptor {
    key: LessSafeKey,
    rng: SystemRandom,
}

impl AesGcmFieldEncryptor {
    /// Creates an encryptor from 32 bytes of key material.
    pub fn new(key_bytes: [u8; 32]) -> Self {
        let unbound = UnboundKey::new(&AES_256_GCM, &key_bytes)
            .expect("AES-256-GCM accepts a 32-byte key");
        Self {
            key: LessSafeKey::new(unbound),
            rng: SystemRandom::new(),
        }
    }
}

impl FieldEncryptor for AesGcmFieldEncryptor {
    fn encrypt(&self, plaintext: &str) -> Result<String, EncryptionError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce_bytes)
            .map_err(|_| EncryptionError::EncryptFailed)?;
        let nonce = Nonce::assume_unique_for_key(nonce_bytes);

        let mut buffer = plaintext.as_bytes().to_vec();
        self.key
            .seal_in_place_append_tag(nonce, Aad::empty(), &mut buffer)
            .map_err(|_| EncryptionError::EncryptFailed)?;

        let mut out = Vec::with_capacity(NONCE_LEN + buffer.len());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&buffer);
        Ok(base64::engine::general_purpose::STANDARD.encode(out))
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, EncryptionError> {
        let raw = base64::engine::general_purpose::STANDARD
            .decode(ciphertext)
            .map_err(|_| EncryptionError::Malformed)?;

        if raw.len() < NONCE_LEN + AES_256_GCM.tag_len() {
            return Err(EncryptionError::Malformed);
        }

        let (nonce_bytes, sealed) = raw.split_at(NONCE_LEN);
        let nonce = Nonce::try_assume_unique_for_key(nonce_bytes)
            .map_err(|_| EncryptionError::Malformed)?;

        let mut buffer = sealed.to_vec();
        let plaintext = self
            .key
            .open_in_place(nonce, Aad::empty(), &mut buffer)
            .map_err(|_| EncryptionError::DecryptFailed)?;

        String::from_utf8(plaintext.to_vec()).map_err(|_| EncryptionError::DecryptFailed)
    }
}
