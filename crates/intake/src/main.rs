//! `card-intake-svc` — service binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the tracing subscriber.
//! 3. Decode the field-encryption key and build the [`FieldEncryptor`].
//! 4. Connect the PostgreSQL pool and ensure the `credit_cards` table exists.
//! 5. Build the Axum router and start the HTTP server.

mod config;
mod crypto;
mod key;
mod luhn;
mod server;
mod store;
mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use config::Config;
use crypto::FieldEncryptor;
use key::SecretKey;
use server::state::AppState;
use store::PgCardStore;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.port,
        "card-intake-svc starting"
    );

    // -----------------------------------------------------------------------
    // 3. Encryption key
    // -----------------------------------------------------------------------
    let secret_key = SecretKey::from_base64(&cfg.secret_key)
        .context("SECRET_KEY must be the base64 encoding of a 256-bit key")?;
    let encryptor = FieldEncryptor::new(&secret_key);

    // -----------------------------------------------------------------------
    // 4. Database
    // -----------------------------------------------------------------------
    let store = PgCardStore::connect(&cfg)
        .await
        .context("failed to initialise the PostgreSQL connection pool")?;
    store
        .ensure_schema()
        .await
        .context("failed to ensure the credit_cards table exists")?;
    info!("database pool initialised");

    // -----------------------------------------------------------------------
    // 5. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(Arc::new(store), encryptor);
    let router = server::router::build(state);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
