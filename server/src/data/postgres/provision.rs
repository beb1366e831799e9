//! Idempotent schema provisioning
//!
//! Each table is checked in `information_schema` and created only when
//! missing. The pass runs in a single transaction under an advisory lock, so
//! concurrent processes starting at the same time take turns instead of
//! racing on `CREATE TABLE`.

use sqlx::{PgConnection, PgPool};

use super::error::PostgresError;
use super::schema::{TABLES, TableDef};
use crate::core::constants::PROVISION_LOCK_KEY;

/// Outcome of a provisioning pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub created: Vec<&'static str>,
    pub existing: Vec<&'static str>,
}

impl ProvisionReport {
    pub fn is_noop(&self) -> bool {
        self.created.is_empty()
    }
}

/// Check whether a table exists in the `public` schema
pub async fn table_exists(conn: &mut PgConnection, name: &str) -> Result<bool, PostgresError> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = $1
        )
        "#,
    )
    .bind(name)
    .fetch_one(conn)
    .await?;

    Ok(exists)
}

/// Create every missing table
pub async fn provision(pool: &PgPool) -> Result<ProvisionReport, PostgresError> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(PROVISION_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    let mut report = ProvisionReport::default();
    for table in TABLES {
        if ensure_table(&mut tx, &table).await? {
            report.created.push(table.name);
        } else {
            report.existing.push(table.name);
        }
    }

    tx.commit().await?;

    tracing::debug!(
        created = ?report.created,
        existing = report.existing.len(),
        "Schema provisioned"
    );
    Ok(report)
}

/// Create a table if absent; returns whether it was created
async fn ensure_table(conn: &mut PgConnection, table: &TableDef) -> Result<bool, PostgresError> {
    if table_exists(conn, table.name).await? {
        tracing::trace!(table = table.name, "Table exists");
        return Ok(false);
    }

    sqlx::query(table.create_sql)
        .execute(&mut *conn)
        .await
        .map_err(|e| PostgresError::ProvisionFailed {
            table: table.name.to_string(),
            error: e.to_string(),
        })?;

    tracing::debug!(table = table.name, "Table created");
    Ok(true)
}
