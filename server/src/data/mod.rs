//! Data storage layer
//!
//! - `postgres` - connection pool, schema provisioning and repositories
//! - `types` - row types shared by the repositories and the domain layer

pub mod postgres;
pub mod types;

pub use postgres::{PgPool, PostgresError, PostgresService};
