//! Database Module
//!
//! Owns the SQLite connection pool, the embedded migrations and the
//! reset used by `--clear`.

pub mod repository;

use shared::error::{AppError, AppResult};
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::core::Config;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Database service, owns the SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Build the pool without opening a connection
    ///
    /// Only a malformed `DATABASE_URL` fails here; connectivity problems show
    /// up on first use.
    pub fn connect_lazy(config: &Config) -> AppResult<Self> {
        let timeout = Duration::from_millis(config.db_timeout_ms);

        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|e| AppError::database(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .busy_timeout(timeout);

        let mut pool_options = SqlitePoolOptions::new().acquire_timeout(timeout);
        if config.is_memory_database() {
            // Every in-memory connection is its own database
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            pool_options = pool_options.max_connections(config.db_max_connections);
        }

        Ok(Self {
            pool: pool_options.connect_lazy_with(options),
        })
    }

    /// Round-trip a trivial query
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database unreachable: {e}")))?;
        Ok(())
    }

    /// Create tables if absent
    pub async fn migrate(&self) -> AppResult<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))
    }

    /// Startup connectivity check
    ///
    /// Failures are logged and reported but never abort the process; requests
    /// that need the database will get 500s until it comes back.
    pub async fn bootstrap(&self) -> bool {
        let result = match self.ping().await {
            Ok(()) => self.migrate().await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                tracing::info!("🐘 Database connection established, migrations applied");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "💀 Failed to connect to the database");
                false
            }
        }
    }

    /// Drop every table and recreate the schema from scratch
    pub async fn reset(&self) -> AppResult<()> {
        for statement in [
            "DROP TABLE IF EXISTS products",
            "DROP TABLE IF EXISTS _sqlx_migrations",
        ] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to drop tables: {e}")))?;
        }
        self.migrate().await?;
        tracing::info!("Database reset");
        Ok(())
    }
}
