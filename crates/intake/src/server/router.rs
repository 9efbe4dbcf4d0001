//! Axum router construction: routes, tracing, timeout, and compression layers.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use super::{handlers, state::AppState};

/// Default per-request timeout applied to all routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the application [`Router`] with all routes and middleware attached.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/submit-card", post(handlers::submit_card))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CompressionLayer::new())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{FieldEncryptor, KEY_LEN};
    use crate::key::SecretKey;
    use crate::store::MockCardStore;
    use axum::{body::Body, http::Request};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state(store: MockCardStore) -> AppState {
        let key = SecretKey::from_bytes(&[0x42u8; KEY_LEN]).unwrap();
        AppState::new(Arc::new(store), FieldEncryptor::new(&key))
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = build(test_state(MockCardStore::new()));
        let req = Request::builder()
            .uri("/unknown")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn health_route_exists() {
        let mut store = MockCardStore::new();
        store.expect_ping().returning(|| false);
        let app = build(test_state(store));
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        // 503 because the mock store reports the database unreachable.
        assert_eq!(resp.status(), 503);
    }

    #[tokio::test]
    async fn submit_route_rejects_get() {
        let app = build(test_state(MockCardStore::new()));
        let req = Request::builder()
            .uri("/submit-card")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 405);
    }
}
