//! PostgreSQL pool for the `postgres` store provider.

use std::str::FromStr;
use std::time::Duration;

use sqlx::Connection;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::{debug, info};

use fithub_core::config::DatabaseConfig;
use fithub_core::{AppError, AppResult, ErrorKind};

/// Shared connection pool plus the schema migrator.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open the pool described by `database.*`.
    ///
    /// Only host, port and database name are logged; the URL may carry a
    /// password.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        if config.url.trim().is_empty() {
            return Err(AppError::configuration(
                "database.url is required for the postgres provider",
            ));
        }

        let options = PgConnectOptions::from_str(&config.url)
            .map_err(|e| db_error("Invalid database.url", e))?;

        info!(
            host = %options.get_host(),
            port = options.get_port(),
            database = options.get_database().unwrap_or("<default>"),
            max_connections = config.max_connections,
            "Opening PostgreSQL pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections.min(config.max_connections))
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_with(options)
            .await
            .map_err(|e| db_error("Failed to connect to database", e))?;

        Ok(Self { pool })
    }

    /// Apply pending migrations from the workspace `migrations/` directory.
    pub async fn migrate(&self) -> AppResult<()> {
        let migrator = sqlx::migrate!("../../migrations");
        migrator
            .run(&self.pool)
            .await
            .map_err(|e| db_error("Failed to run migrations", e))?;
        info!(count = migrator.iter().count(), "Schema is up to date");
        Ok(())
    }

    /// The underlying pool, shared by the repositories.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trip a ping on one pooled connection.
    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| db_error("No database connection available", e))?;
        conn.ping()
            .await
            .map_err(|e| db_error("Database ping failed", e))?;
        debug!(idle = self.pool.num_idle(), size = self.pool.size(), "Database ping ok");
        Ok(())
    }

    /// Wait for checked-out connections and close the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("PostgreSQL pool closed");
    }
}

fn db_error(context: &str, err: impl std::error::Error + Send + Sync + 'static) -> AppError {
    AppError::with_source(ErrorKind::Database, format!("{context}: {err}"), err)
}
