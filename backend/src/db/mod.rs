//! Postgres pool for the `postgres` store backend.
//!
//! Bookings, payments and the rest of the marketplace tables live behind
//! [`crate::repository::PgStore`]; this module only opens the pool, applies
//! the schema under `migrations/` and answers liveness pings for `/health`.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("postgres backend selected but DATABASE_URL is unset")]
    MissingUrl,

    #[error("could not open postgres pool: {0}")]
    Connect(String),

    #[error("schema migration failed: {0}")]
    Migrate(String),

    #[error("postgres ping failed: {0}")]
    Ping(String),
}

/// Pool sizing and timeouts taken from [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl PoolSettings {
    pub fn from_config(config: &Config) -> Result<Self, DbError> {
        let url = config.database_url.clone().ok_or(DbError::MissingUrl)?;
        Ok(Self {
            url,
            // a zero-sized pool would hang every request
            max_connections: config.db_max_connections.max(1),
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(600),
        })
    }

    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
    }
}

pub async fn connect(config: &Config) -> Result<PgPool, DbError> {
    let settings = PoolSettings::from_config(config)?;

    tracing::info!(
        url = %config.database_url_masked(),
        max_connections = settings.max_connections,
        "opening postgres pool"
    );

    let pool = settings
        .options()
        .connect(&settings.url)
        .await
        .map_err(|e| DbError::Connect(e.to_string()))?;

    tracing::debug!(size = pool.size(), "postgres pool ready");
    Ok(pool)
}

/// Apply any pending files from `migrations/`.
pub async fn migrate(pool: &PgPool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DbError::Migrate(e.to_string()))?;

    tracing::info!("marketplace schema is current");
    Ok(())
}

pub async fn ping(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| DbError::Ping(e.to_string()))
}
