//! Structured logging setup for the service.
//!
//! # Telemetry invariants
//!
//! - **No card data or key material** must appear in any span attribute or
//!   log field.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); the
//!   standard `RUST_LOG` environment filter takes precedence when set.

pub mod init;

pub use init::init_telemetry;
