//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::InvalidCard`] → 400
/// - [`ServiceError::MalformedRequest`] → 400
/// - [`ServiceError::PersistenceFailure`] → 500
/// - [`ServiceError::Internal`] → 500
///
/// The `Display` output of the 5xx variants carries internal detail for
/// logging; [`ServiceError::client_message`] is what goes over the wire.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The card number failed its checksum. User-correctable; nothing was
    /// encrypted or written.
    #[error("invalid card number")]
    InvalidCard,

    /// The request body was missing fields or was not valid JSON.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// The database write could not be completed.
    #[error("persistence failure: {0}")]
    PersistenceFailure(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::InvalidCard => 400,
            ServiceError::MalformedRequest(_) => 400,
            ServiceError::PersistenceFailure(_) => 500,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable category for the error response body.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::InvalidCard => "invalid_card",
            ServiceError::MalformedRequest(_) => "malformed_request",
            ServiceError::PersistenceFailure(_) => "persistence_failure",
            ServiceError::Internal(_) => "internal_error",
        }
    }

    /// The message safe to expose to the caller.
    ///
    /// Client errors echo enough detail to correct the request; server errors
    /// are generic — the underlying cause stays in the logs.
    pub fn client_message(&self) -> String {
        match self {
            ServiceError::InvalidCard => "Invalid card number.".into(),
            ServiceError::MalformedRequest(detail) => format!("Malformed request: {detail}"),
            ServiceError::PersistenceFailure(_) => "Failed to submit card data".into(),
            ServiceError::Internal(_) => "Internal server error".into(),
        }
    }
}
