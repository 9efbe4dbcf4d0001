//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::crypto::FieldEncryptor;
use crate::store::CardStore;

/// Application state shared across all request handlers.
///
/// Both dependencies are constructor-injected: the store is a trait object so
/// tests can substitute a mock, and the encryptor already holds the process
/// key. All fields are cheaply cloneable so Axum can clone the state per
/// request.
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend for encrypted card records.
    pub store: Arc<dyn CardStore>,
    /// Field encryptor bound to the process-wide secret key.
    pub encryptor: FieldEncryptor,
}

impl AppState {
    /// Create a new [`AppState`] from the injected dependencies.
    pub fn new(store: Arc<dyn CardStore>, encryptor: FieldEncryptor) -> Self {
        Self { store, encryptor }
    }
}
