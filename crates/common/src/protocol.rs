//! Request and response types exchanged with callers.
//!
//! These types are serialised as JSON over the public HTTP API. Field names
//! are camelCase on the wire to match the existing client contract.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Submit-card endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /submit-card`.
///
/// All four fields are required. `card_number` and `cvv` are encrypted before
/// anything is persisted; the other two fields are stored as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCardRequest {
    /// Card number as a digit string; validated against its Luhn checksum.
    pub card_number: String,
    /// Card verification value as a digit string.
    pub cvv: String,
    /// Cardholder name, free text.
    pub card_holder_name: String,
    /// Expiration date, free text (format not validated here).
    pub expiration_date: String,
}

/// Successful response body for `POST /submit-card`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitCardResponse {
    /// Human-readable acknowledgment.
    pub message: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"invalid_card"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Whether the database answered a connectivity probe.
    pub database_ready: bool,
}
