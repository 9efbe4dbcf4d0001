//! Process-wide secret key for field encryption.
//!
//! The key is supplied once at startup (base64 in configuration) and is
//! immutable for the life of the process. Key rotation is out of scope.
//!
//! # Security invariants
//!
//! - The plaintext key is **never** written to disk, logged, or included in
//!   traces; `Debug` output is redacted.
//! - The key buffer is overwritten with zeroes when the last handle drops.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::crypto::KEY_LEN;

/// Errors produced when loading the secret key from configuration.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The configured value is not valid base64.
    #[error("secret key is not valid base64")]
    InvalidEncoding,

    /// The decoded key material has an unexpected length.
    #[error("secret key has invalid length: expected {KEY_LEN} bytes, got {0}")]
    InvalidLength(usize),
}

/// Fixed-size key buffer holding exactly [`KEY_LEN`] bytes.
///
/// Zeroed on drop to minimise the window during which plaintext key material
/// lives in RAM.
struct KeyBytes(Box<[u8; KEY_LEN]>);

impl Drop for KeyBytes {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

/// Handle to the process-wide secret key.
///
/// Cheaply cloneable; all clones share one zero-on-drop buffer.
#[derive(Clone)]
pub struct SecretKey {
    inner: Arc<KeyBytes>,
}

impl SecretKey {
    /// Decode a base64-encoded 32-byte key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidEncoding`] if `encoded` is not base64, or
    /// [`KeyError::InvalidLength`] if it does not decode to [`KEY_LEN`] bytes.
    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| KeyError::InvalidEncoding)?;
        Self::from_bytes(&decoded)
    }

    /// Wrap raw key material.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidLength`] if `bytes` is not [`KEY_LEN`] long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != KEY_LEN {
            return Err(KeyError::InvalidLength(bytes.len()));
        }
        let mut buf = Box::new([0u8; KEY_LEN]);
        buf.copy_from_slice(bytes);
        Ok(Self {
            inner: Arc::new(KeyBytes(buf)),
        })
    }

    /// Borrow the raw key bytes.
    pub(crate) fn bytes(&self) -> &[u8; KEY_LEN] {
        &self.inner.0
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("SecretKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_valid_base64_key() {
        let encoded = STANDARD.encode([0x42u8; KEY_LEN]);
        let key = SecretKey::from_base64(&encoded).unwrap();
        assert_eq!(key.bytes(), &[0x42u8; KEY_LEN]);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let encoded = format!("  {}\n", STANDARD.encode([0x01u8; KEY_LEN]));
        assert!(SecretKey::from_base64(&encoded).is_ok());
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(matches!(
            SecretKey::from_base64("not!!base64"),
            Err(KeyError::InvalidEncoding)
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        let encoded = STANDARD.encode([0u8; 16]);
        assert!(matches!(
            SecretKey::from_base64(&encoded),
            Err(KeyError::InvalidLength(16))
        ));
    }

    #[test]
    fn clones_share_key_material() {
        let key = SecretKey::from_bytes(&[0x07u8; KEY_LEN]).unwrap();
        let clone = key.clone();
        assert_eq!(key.bytes(), clone.bytes());
    }

    #[test]
    fn debug_output_is_redacted() {
        let key = SecretKey::from_bytes(&[0xFFu8; KEY_LEN]).unwrap();
        assert_eq!(format!("{key:?}"), "SecretKey([REDACTED])");
    }
}
