//! PostgreSQL database service
//!
//! Owns the process-wide connection pool. Every request handler shares the
//! same pool; schema provisioning runs once when the service starts.

pub mod error;
pub mod provision;
pub mod repositories;
pub mod schema;

pub use error::PostgresError;
pub use provision::ProvisionReport;
pub use sqlx::PgPool;

use std::time::Duration;

use sqlx::ConnectOptions;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::log::LevelFilter;

use crate::core::config::PostgresConfig;
use crate::core::constants::POSTGRES_DEFAULT_SSLMODE;

/// Append `sslmode=disable` unless the URL already chooses an SSL mode
pub fn with_default_sslmode(url: &str) -> String {
    if url.contains("sslmode=") {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}sslmode={}", url, separator, POSTGRES_DEFAULT_SSLMODE)
}

/// Round-trip a trivial query through the pool
pub async fn ping(pool: &PgPool) -> Result<(), PostgresError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// PostgreSQL database service
///
/// Should be created once at startup and shared across all modules.
pub struct PostgresService {
    pool: PgPool,
}

impl PostgresService {
    /// Connect and provision the schema
    pub async fn init(config: &PostgresConfig) -> Result<Self, PostgresError> {
        let service = Self::connect(config).await?;
        let report = service.provision().await?;
        if report.is_noop() {
            tracing::debug!("All tables ensured");
        } else {
            tracing::info!(created = ?report.created, "Created missing tables");
        }
        Ok(service)
    }

    /// Build the pool without touching the schema
    pub async fn connect(config: &PostgresConfig) -> Result<Self, PostgresError> {
        if config.url.is_empty() {
            return Err(PostgresError::Config("PostgreSQL URL is required".into()));
        }

        let url = with_default_sslmode(&config.url);
        let mut options: PgConnectOptions = url
            .parse()
            .map_err(|e| PostgresError::Config(format!("Invalid PostgreSQL URL: {}", e)))?;

        options = options.log_statements(LevelFilter::Trace);

        if config.statement_timeout_secs > 0 {
            options = options.options([(
                "statement_timeout",
                format!("{}s", config.statement_timeout_secs),
            )]);
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .connect_with(options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to connect to the database");
                PostgresError::Database(e)
            })?;

        tracing::debug!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            statement_timeout_secs = config.statement_timeout_secs,
            "Connected to the database"
        );
        Ok(Self { pool })
    }

    /// Wrap an existing pool (tests and tooling)
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create any missing tables
    pub async fn provision(&self) -> Result<ProvisionReport, PostgresError> {
        provision::provision(&self.pool).await
    }

    /// Close the connection pool gracefully
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("PostgreSQL pool closed");
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::core::constants::ENV_POSTGRES_URL;

    /// Pool against `POSTGRES_URL` with the schema provisioned
    pub async fn pool() -> PgPool {
        let _ = dotenvy::dotenv();
        let url = std::env::var(ENV_POSTGRES_URL)
            .expect("POSTGRES_URL must be set for database tests");
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect(&with_default_sslmode(&url))
            .await
            .expect("connect to test database");
        provision::provision(&pool).await.expect("provision schema");
        pool
    }

    /// Pool that never connects; any query fails after a short timeout
    pub fn unreachable_pool() -> PgPool {
        PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy("postgres://barters@127.0.0.1:1/barters?sslmode=disable")
            .expect("lazy pool from static URL")
    }
}
