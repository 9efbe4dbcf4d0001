//! PostgreSQL-backed [`CardStore`] over a shared `sqlx` connection pool.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{CardStore, EncryptedCardRecord, StoreError};
use crate::config::Config;

/// Parameterized insert; values are bound, never concatenated.
const INSERT_SQL: &str = "INSERT INTO credit_cards \
    (card_number, cvv, card_holder_name, expiration_date) \
    VALUES ($1, $2, $3, $4)";

/// Idempotent schema bootstrap run once at startup.
const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS credit_cards (
    id BIGSERIAL PRIMARY KEY,
    card_number TEXT NOT NULL,
    cvv TEXT NOT NULL,
    card_holder_name TEXT NOT NULL,
    expiration_date TEXT NOT NULL
)";

/// [`CardStore`] implementation backed by a pooled PostgreSQL connection.
///
/// The pool is the only shared mutable resource in the service; it queues
/// callers when all connections are busy, so a slow insert suspends only the
/// requesting task.
#[derive(Clone)]
pub struct PgCardStore {
    pool: PgPool,
}

impl PgCardStore {
    /// Build the connection pool from configuration and verify connectivity.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the pool cannot be established with
    /// the configured connection string and limits.
    pub async fn connect(cfg: &Config) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(cfg.db_max_connections)
            .acquire_timeout(Duration::from_secs(cfg.db_acquire_timeout_secs))
            .connect(&cfg.database_url)
            .await
            .map_err(|e| StoreError::Config(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Create the `credit_cards` table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::WriteFailed`] if the DDL statement fails.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CardStore for PgCardStore {
    async fn insert(&self, record: &EncryptedCardRecord) -> Result<(), StoreError> {
        sqlx::query(INSERT_SQL)
            .bind(&record.encrypted_card_number)
            .bind(&record.encrypted_cvv)
            .bind(&record.card_holder_name)
            .bind(&record.expiration_date)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_binds_all_four_columns() {
        assert_eq!(INSERT_SQL.matches('$').count(), 4);
        for column in ["card_number", "cvv", "card_holder_name", "expiration_date"] {
            assert!(INSERT_SQL.contains(column), "missing column: {column}");
        }
    }

    #[test]
    fn schema_bootstrap_is_idempotent() {
        assert!(CREATE_TABLE_SQL.contains("IF NOT EXISTS"));
    }
}
