//! PostgreSQL error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostgresError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Provisioning table {table} failed: {error}")]
    ProvisionFailed { table: String, error: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid {column} value in database: {value}")]
    InvalidValue { column: &'static str, value: String },
}

impl PostgresError {
    /// Map a unique-constraint violation to `Conflict`, keep everything else
    pub fn from_insert(e: sqlx::Error, what: &str) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Conflict(format!("{} already exists", what))
            }
            _ => Self::Database(e),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provision_failed_display() {
        let err = PostgresError::ProvisionFailed {
            table: "School".to_string(),
            error: "permission denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Provisioning table School failed: permission denied"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = PostgresError::Config("missing URL".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing URL");
    }

    #[test]
    fn test_from_insert_keeps_non_constraint_errors() {
        let err = PostgresError::from_insert(sqlx::Error::RowNotFound, "account");
        assert!(!err.is_conflict());
        assert!(matches!(err, PostgresError::Database(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn test_invalid_value_display() {
        let err = PostgresError::InvalidValue {
            column: "offers.status",
            value: "sold".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid offers.status value in database: sold");
    }
}
