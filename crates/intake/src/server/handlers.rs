//! Axum request handlers for all service endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::{
    protocol::{ErrorResponse, HealthResponse, SubmitCardRequest, SubmitCardResponse},
    ServiceError,
};
use tracing::warn;

use super::state::AppState;
use crate::luhn;
use crate::store::EncryptedCardRecord;

/// `POST /submit-card` — validate, encrypt, and persist one card submission.
///
/// The body extractor is taken as a `Result` so a missing field or invalid
/// JSON surfaces as a `malformed_request` error body instead of Axum's
/// default plaintext rejection.
pub async fn submit_card(
    State(state): State<AppState>,
    payload: Result<Json<SubmitCardRequest>, JsonRejection>,
) -> Response {
    let submission = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return error_response(&ServiceError::MalformedRequest(rejection.body_text()));
        }
    };

    match process_submission(&state, submission).await {
        Ok(()) => (
            StatusCode::OK,
            Json(SubmitCardResponse {
                message: "Card data submitted successfully!".into(),
            }),
        )
            .into_response(),
        Err(err) => error_response(&err),
    }
}

/// Run the submission pipeline: checksum validation, field encryption,
/// persistence. Each stage short-circuits the rest on failure.
///
/// Validation runs before any cryptographic or database work, so an invalid
/// card number has zero side effects even when every other field is
/// well-formed.
async fn process_submission(
    state: &AppState,
    submission: SubmitCardRequest,
) -> Result<(), ServiceError> {
    if !luhn::is_valid(&submission.card_number) {
        return Err(ServiceError::InvalidCard);
    }

    // Card number and CVV are encrypted independently; each ciphertext
    // carries its own nonce.
    let encrypted_card_number = state
        .encryptor
        .encrypt(&submission.card_number)
        .map_err(|e| ServiceError::Internal(e.to_string()))?;
    let encrypted_cvv = state
        .encryptor
        .encrypt(&submission.cvv)
        .map_err(|e| ServiceError::Internal(e.to_string()))?;

    let record = EncryptedCardRecord {
        encrypted_card_number,
        encrypted_cvv,
        card_holder_name: submission.card_holder_name,
        expiration_date: submission.expiration_date,
    };

    state.store.insert(&record).await.map_err(|e| {
        // Full cause stays in the logs; the caller gets a generic message.
        warn!(error = %e, "card record insert failed");
        ServiceError::PersistenceFailure(e.to_string())
    })?;

    Ok(())
}

/// `GET /health` — liveness and readiness check.
///
/// Returns `200 OK` when the database answers a connectivity probe and
/// `503 Service Unavailable` otherwise.
pub async fn health(State(state): State<AppState>) -> Response {
    let database_ready = state.store.ping().await;

    let (status_code, status_str) = if database_ready {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status: status_str.into(),
        database_ready,
    };
    (status_code, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

/// Map a [`ServiceError`] to its HTTP response, exposing only the
/// caller-safe message.
fn error_response(err: &ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.code(), err.client_message()))).into_response()
}
