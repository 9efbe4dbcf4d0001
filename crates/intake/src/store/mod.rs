//! Submission persistence: the [`CardStore`] trait and its PostgreSQL backend.
//!
//! The store only ever sees [`EncryptedCardRecord`] values, built after the
//! card number has passed checksum validation and the sensitive fields have
//! been encrypted. Plaintext card data never reaches this layer.

pub mod postgres;

pub use postgres::PgCardStore;

use async_trait::async_trait;
use thiserror::Error;

/// A card record with sensitive fields already encrypted, ready to persist.
///
/// `encrypted_card_number` and `encrypted_cvv` hold opaque
/// `v1.<nonce>.<ciphertext>` strings; the other two fields are stored as
/// submitted. Records are insert-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedCardRecord {
    /// Ciphertext of the validated card number.
    pub encrypted_card_number: String,
    /// Ciphertext of the CVV.
    pub encrypted_cvv: String,
    /// Cardholder name, plaintext.
    pub card_holder_name: String,
    /// Expiration date, plaintext.
    pub expiration_date: String,
}

/// Errors produced by the store layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The pool could not be built or the connection string is unusable.
    #[error("invalid database configuration: {0}")]
    Config(String),

    /// The write could not be completed. Pool exhaustion, constraint
    /// violations, and connectivity loss are not distinguished here; callers
    /// treat all write failures uniformly.
    #[error("database write failed: {0}")]
    WriteFailed(#[from] sqlx::Error),
}

/// Persistence interface for encrypted card submissions.
///
/// Injected into the request handlers as a trait object so tests can
/// substitute a mock or recording store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Insert one record. Atomic at the row level: either the row is durably
    /// written or an error is returned.
    async fn insert(&self, record: &EncryptedCardRecord) -> Result<(), StoreError>;

    /// Cheap connectivity probe used by the health endpoint.
    async fn ping(&self) -> bool;
}
