//! Axum HTTP server, routing, and middleware.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared middleware.
//! - Inject shared application state (`AppState`) into handlers.
//! - Run the submission pipeline and map outcomes to HTTP responses.

pub mod handlers;
pub mod router;
pub mod state;
