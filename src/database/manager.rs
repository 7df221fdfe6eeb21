use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the document store layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Collections, one table each. Pending premium requests are unique per email
/// and biodata ids are unique, so racing writers fail instead of duplicating.
const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS users (
        email       TEXT PRIMARY KEY,
        name        TEXT NOT NULL DEFAULT '',
        photo_url   TEXT,
        role        TEXT NOT NULL DEFAULT 'none',
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS biodatas (
        biodata_id              BIGINT PRIMARY KEY,
        email                   TEXT NOT NULL,
        biodata_type            TEXT NOT NULL,
        name                    TEXT NOT NULL DEFAULT '',
        profile_image           TEXT NOT NULL DEFAULT '',
        date_of_birth           TEXT NOT NULL DEFAULT '',
        height                  TEXT NOT NULL DEFAULT '',
        weight                  TEXT NOT NULL DEFAULT '',
        age                     INTEGER,
        occupation              TEXT NOT NULL DEFAULT '',
        race                    TEXT NOT NULL DEFAULT '',
        fathers_name            TEXT NOT NULL DEFAULT '',
        mothers_name            TEXT NOT NULL DEFAULT '',
        permanent_division      TEXT NOT NULL DEFAULT '',
        present_division        TEXT NOT NULL DEFAULT '',
        expected_partner_age    INTEGER,
        expected_partner_height TEXT NOT NULL DEFAULT '',
        expected_partner_weight TEXT NOT NULL DEFAULT '',
        mobile_number           TEXT NOT NULL DEFAULT ''
    )"#,
    "CREATE INDEX IF NOT EXISTS biodatas_email_idx ON biodatas (email)",
    r#"CREATE TABLE IF NOT EXISTS favorites_biodata (
        id                  UUID PRIMARY KEY,
        email               TEXT NOT NULL,
        biodata_id          BIGINT NOT NULL,
        name                TEXT NOT NULL DEFAULT '',
        permanent_division  TEXT NOT NULL DEFAULT '',
        occupation          TEXT NOT NULL DEFAULT ''
    )"#,
    r#"CREATE TABLE IF NOT EXISTS premium_requests (
        id          UUID PRIMARY KEY,
        email       TEXT NOT NULL,
        name        TEXT NOT NULL DEFAULT '',
        biodata_id  BIGINT,
        status      TEXT NOT NULL,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )"#,
    "CREATE UNIQUE INDEX IF NOT EXISTS premium_requests_one_pending ON premium_requests (email) WHERE status = 'pending'",
    r#"CREATE TABLE IF NOT EXISTS payments (
        id              UUID PRIMARY KEY,
        email           TEXT NOT NULL,
        biodata_id      BIGINT,
        amount          DOUBLE PRECISION NOT NULL,
        transaction_id  TEXT NOT NULL DEFAULT '',
        status          TEXT NOT NULL,
        created_at      TIMESTAMPTZ NOT NULL DEFAULT now()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS success_stories (
        id                  UUID PRIMARY KEY,
        biodata_id_self     BIGINT NOT NULL,
        biodata_id_partner  BIGINT NOT NULL,
        image               TEXT NOT NULL DEFAULT '',
        marriage_date       DATE NOT NULL,
        rating              INTEGER NOT NULL DEFAULT 0,
        review              TEXT NOT NULL DEFAULT ''
    )"#,
];

/// Owns the single long-lived connection pool
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open the pool described by config
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        info!("Created database pool ({} max connections)", config.max_connections);
        Ok(pool)
    }

    /// Create any missing collections and indexes
    pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(pool)
                .await
                .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
        }
        info!("Database schema ready ({} statements)", SCHEMA.len());
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
