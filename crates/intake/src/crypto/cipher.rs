//! AES-256-GCM-SIV encryption and decryption of individual string fields.
//!
//! **Algorithm choice:** AES-256-GCM-SIV (RFC 8452) with a random 96-bit
//! nonce generated per call from the OS CSPRNG. Encrypting the same plaintext
//! twice yields different ciphertexts, and the SIV construction stays safe
//! even if a nonce were ever to repeat.
//!
//! **Do NOT substitute plain AES-256-GCM with a fixed nonce.** GCM nonce
//! reuse is catastrophic — it breaks both confidentiality and authentication.

use aes_gcm_siv::{
    aead::{Aead, KeyInit, OsRng},
    Aes256GcmSiv, Key, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use thiserror::Error;

use crate::key::SecretKey;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of an AES-GCM-SIV nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Prefix that appears at the start of every encrypted field value.
pub const VERSION_PREFIX: &str = "v1";

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// AES-GCM-SIV encryption or decryption failed (wrong key or tampered
    /// ciphertext on the decrypt path).
    #[error("aead operation failed")]
    AeadFailure,

    /// The encrypted field string does not match the expected format.
    // Only reachable through decrypt; see the note there.
    #[allow(dead_code)]
    #[error("invalid encrypted field format")]
    InvalidFormat,

    /// Decryption succeeded but the plaintext is not valid UTF-8.
    // Only reachable through decrypt; see the note there.
    #[allow(dead_code)]
    #[error("decrypted plaintext is not valid UTF-8")]
    InvalidUtf8,
}

/// A parsed, encrypted field value.
///
/// The string representation is `v1.<base64url(nonce)>.<base64url(ciphertext+tag)>`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EncryptedField {
    /// Raw nonce bytes.
    nonce: [u8; NONCE_LEN],
    /// Raw ciphertext + authentication tag bytes.
    ciphertext: Vec<u8>,
}

impl EncryptedField {
    /// Encode this value to its canonical string representation.
    fn to_string_repr(&self) -> String {
        format!(
            "{}.{}.{}",
            VERSION_PREFIX,
            URL_SAFE_NO_PAD.encode(self.nonce),
            URL_SAFE_NO_PAD.encode(&self.ciphertext),
        )
    }

    /// Parse an encrypted field string back into an [`EncryptedField`].
    // Only reachable through decrypt; see the note there.
    #[allow(dead_code)]
    fn parse(s: &str) -> Result<Self, CipherError> {
        let parts: Vec<&str> = s.splitn(3, '.').collect();
        if parts.len() != 3 || parts[0] != VERSION_PREFIX {
            return Err(CipherError::InvalidFormat);
        }
        let nonce_bytes = URL_SAFE_NO_PAD
            .decode(parts[1])
            .map_err(|_| CipherError::InvalidFormat)?;
        if nonce_bytes.len() != NONCE_LEN {
            return Err(CipherError::InvalidFormat);
        }
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&nonce_bytes);

        let ciphertext = URL_SAFE_NO_PAD
            .decode(parts[2])
            .map_err(|_| CipherError::InvalidFormat)?;

        Ok(Self { nonce, ciphertext })
    }
}

/// Encrypts individual string fields under the process-wide secret key.
///
/// Holds a cheap handle to the key; clones share nothing mutable, so one
/// encryptor can be cloned into every request handler.
#[derive(Clone)]
pub struct FieldEncryptor {
    key: SecretKey,
}

impl FieldEncryptor {
    /// Build an encryptor from the process secret key.
    ///
    /// Infallible: [`SecretKey`] guarantees the key length.
    pub fn new(key: &SecretKey) -> Self {
        Self { key: key.clone() }
    }

    fn cipher(&self) -> Aes256GcmSiv {
        Aes256GcmSiv::new(Key::<Aes256GcmSiv>::from_slice(self.key.bytes()))
    }

    /// Encrypt a plaintext field to its self-contained string encoding.
    ///
    /// A fresh random nonce is generated per call, so encrypting the same
    /// plaintext twice produces different outputs.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::AeadFailure`] on an internal AEAD error (should
    /// be unreachable with a valid key and nonce).
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        use aes_gcm_siv::aead::rand_core::RngCore;
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher()
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| CipherError::AeadFailure)?;

        Ok(EncryptedField {
            nonce: nonce_bytes,
            ciphertext,
        }
        .to_string_repr())
    }

    /// Decrypt an encoded field back to its plaintext.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidFormat`] if `encoded` does not match the
    /// `v1.<nonce>.<ciphertext>` structure, or [`CipherError::AeadFailure`]
    /// if authentication fails (wrong key or tampered data).
    // No decrypt endpoint exists; exercised by round-trip tests.
    #[allow(dead_code)]
    pub fn decrypt(&self, encoded: &str) -> Result<String, CipherError> {
        let field = EncryptedField::parse(encoded)?;
        let nonce = Nonce::from_slice(&field.nonce);
        let plaintext = self
            .cipher()
            .decrypt(nonce, field.ciphertext.as_ref())
            .map_err(|_| CipherError::AeadFailure)?;
        String::from_utf8(plaintext).map_err(|_| CipherError::InvalidUtf8)
    }
}

impl std::fmt::Debug for FieldEncryptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material must never leak through Debug.
        f.write_str("FieldEncryptor([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_encryptor() -> FieldEncryptor {
        let key = SecretKey::from_bytes(&[0x42u8; KEY_LEN]).unwrap();
        FieldEncryptor::new(&key)
    }

    fn random_encryptor() -> FieldEncryptor {
        use aes_gcm_siv::aead::rand_core::RngCore;
        let mut bytes = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        FieldEncryptor::new(&SecretKey::from_bytes(&bytes).unwrap())
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let enc = random_encryptor();
        let encrypted = enc.encrypt("4532015112830366").unwrap();
        assert_eq!(enc.decrypt(&encrypted).unwrap(), "4532015112830366");
    }

    #[test]
    fn output_carries_version_prefix() {
        let enc = test_encryptor();
        let encrypted = enc.encrypt("123").unwrap();
        assert!(encrypted.starts_with("v1."), "got: {encrypted}");
    }

    #[test]
    fn same_plaintext_encrypts_differently() {
        let enc = test_encryptor();
        let first = enc.encrypt("4532015112830366").unwrap();
        let second = enc.encrypt("4532015112830366").unwrap();
        assert_ne!(first, second, "nonce must be fresh per call");
    }

    #[test]
    fn wrong_key_fails_decryption() {
        let enc1 = random_encryptor();
        let enc2 = random_encryptor();
        let encrypted = enc1.encrypt("secret").unwrap();
        assert!(matches!(
            enc2.decrypt(&encrypted),
            Err(CipherError::AeadFailure)
        ));
    }

    #[test]
    fn tampered_ciphertext_fails_auth() {
        let enc = test_encryptor();
        let encrypted = enc.encrypt("tamper me").unwrap();
        let mut field = EncryptedField::parse(&encrypted).unwrap();
        field.ciphertext[0] ^= 0xFF;
        assert!(matches!(
            enc.decrypt(&field.to_string_repr()),
            Err(CipherError::AeadFailure)
        ));
    }

    #[test]
    fn decrypt_rejects_bad_prefix() {
        let enc = test_encryptor();
        assert!(matches!(
            enc.decrypt("v2.abc.def"),
            Err(CipherError::InvalidFormat)
        ));
    }

    #[test]
    fn decrypt_rejects_too_few_parts() {
        let enc = test_encryptor();
        assert!(enc.decrypt("v1.abc").is_err());
    }

    #[test]
    fn decrypt_rejects_bad_base64() {
        let enc = test_encryptor();
        assert!(enc.decrypt("v1.!!!.abc").is_err());
    }

    #[test]
    fn decrypt_rejects_wrong_nonce_length() {
        let enc = test_encryptor();
        let short_nonce = URL_SAFE_NO_PAD.encode([0u8; 4]);
        assert!(enc.decrypt(&format!("v1.{short_nonce}.abcd")).is_err());
    }

    #[test]
    fn empty_plaintext_round_trips() {
        let enc = test_encryptor();
        let encrypted = enc.encrypt("").unwrap();
        assert_eq!(enc.decrypt(&encrypted).unwrap(), "");
    }
}
