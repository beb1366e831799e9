//! Liveness and database reachability

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::data::PgPool;
use crate::data::postgres::ping;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database cannot be reached
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// Create health routes (mounted under `/api`)
pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(pool)
}

/// 200 when the database answers, 503 otherwise
pub async fn health(State(pool): State<PgPool>) -> impl IntoResponse {
    let (code, status, database) = match ping(&pool).await {
        Ok(()) => (StatusCode::OK, "ok", "reachable"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unreachable")
        }
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}
