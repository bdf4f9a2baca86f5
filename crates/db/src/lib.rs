// crates/db/src/lib.rs
// Read-only PostgreSQL query layer for the chatview dashboard.
#![allow(clippy::type_complexity)]

mod config;
mod queries;

pub use config::{ConfigError, StoreConfig};
pub use queries::conversations::{page_count, ConversationFilter, MAX_PER_PAGE};

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

/// The chat-log table written by the upstream automation pipeline.
/// This crate only ever reads from it; there is no schema to migrate.
pub(crate) const CHAT_TABLE: &str = "n8n_chat_histories";

#[derive(Debug, Error)]
pub enum DbError {
    #[error("PostgreSQL error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// Main database handle wrapping a PostgreSQL connection pool.
///
/// Every query acquires a pooled connection for its own duration and
/// releases it on completion, success or failure.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
    display_timezone: String,
}

impl Database {
    /// Connect to the store and verify the configured display timezone.
    ///
    /// A bad zone name would otherwise fail on every query; the probe
    /// surfaces it at startup instead.
    pub async fn connect(config: &StoreConfig) -> DbResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect_with(pg_options(config))
            .await?;

        let db = Self {
            pool,
            display_timezone: config.display_timezone.clone(),
        };
        db.verify_timezone().await?;

        info!(host = %config.host, dbname = %config.dbname, "Connected to chat store");
        Ok(db)
    }

    /// Build a handle without touching the network.
    ///
    /// Connections are established lazily on first use, and the timezone
    /// probe is skipped. Queries against an unreachable store fail with
    /// [`DbError::Sqlx`]; handler tests use this to exercise error paths.
    pub fn connect_lazy(config: &StoreConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect_lazy_with(pg_options(config));

        Self {
            pool,
            display_timezone: config.display_timezone.clone(),
        }
    }

    /// Connect using a libpq-style URL instead of a [`StoreConfig`].
    ///
    /// Integration tests point this at a scratch database.
    pub async fn connect_url(url: &str, display_timezone: &str) -> DbResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect(url)
            .await?;

        let db = Self {
            pool,
            display_timezone: display_timezone.to_string(),
        };
        db.verify_timezone().await?;
        Ok(db)
    }

    async fn verify_timezone(&self) -> DbResult<()> {
        sqlx::query("SELECT now() AT TIME ZONE $1")
            .bind(&self.display_timezone)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// The IANA timezone applied to timestamps at read time.
    pub fn display_timezone(&self) -> &str {
        &self.display_timezone
    }
}

fn pg_options(config: &StoreConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.dbname)
}
