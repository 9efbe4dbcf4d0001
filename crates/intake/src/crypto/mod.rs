//! AES-256-GCM-SIV field encryption.
//!
//! This module is intentionally free of HTTP and database dependencies.
//! It provides the string-level encrypt/decrypt operations used by the
//! submission pipeline.
//!
//! # Ciphertext format
//!
//! ```text
//! v1.<base64url-no-pad(nonce)>.<base64url-no-pad(ciphertext+tag)>
//! ```
//!
//! The encoding is self-contained: the per-call nonce travels with the
//! ciphertext, so nothing besides the key is needed to decrypt later. The
//! `v1` prefix enables future algorithm or key-version migration without
//! breaking existing ciphertext.

pub mod cipher;

pub use cipher::{FieldEncryptor, KEY_LEN};
