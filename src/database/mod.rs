//! Postgres connection handling.

use crate::config::DatabaseConfig;
use crate::error::AppResult;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect: {0}")]
    Connect(sqlx::Error),

    #[error("Database connection timeout")]
    ConnectionTimeout,

    #[error("Database migration failed: {0}")]
    Migration(#[from] MigrateError),

    #[error("Invalid database settings: {0}")]
    Config(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => DatabaseError::ConnectionTimeout,
            other => DatabaseError::Connect(other),
        }
    }
}

/// Migrated Postgres pool shared by the repositories
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open a pool with the configured limits and bring the schema
    /// up to date from `migrations`.
    pub async fn connect(config: &DatabaseConfig, migrations: &Path) -> AppResult<Self> {
        config.validate().map_err(DatabaseError::Config)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .idle_timeout(config.idle_timeout())
            .max_lifetime(config.max_lifetime())
            .test_before_acquire(config.test_before_acquire)
            .connect(&config.url)
            .await
            .map_err(DatabaseError::from)?;

        let migrator = Migrator::new(migrations).await.map_err(DatabaseError::from)?;
        migrator.run(&pool).await.map_err(DatabaseError::from)?;

        info!(
            "Connected to database ({} max connections, {} migrations)",
            config.max_connections,
            migrator.iter().count()
        );
        Ok(Self { pool })
    }

    pub fn into_pool(self) -> PgPool {
        self.pool
    }
}
