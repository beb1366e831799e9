//! School statistics endpoints

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::types::{ApiError, DataResponse};
use crate::data::PgPool;
use crate::domain::{FiveUnitStat, calculate_five_unit_percentage};

/// Create stats routes (mounted under `/api`)
pub fn routes(pool: PgPool) -> Router {
    Router::new()
        .route(
            "/calculate-five-unit-percentage",
            get(five_unit_percentage),
        )
        .with_state(pool)
}

/// Five-unit percentage for every school
///
/// Any failure is answered with a plain `500 Internal Server Error`.
pub async fn five_unit_percentage(
    State(pool): State<PgPool>,
) -> Result<Json<DataResponse<FiveUnitStat>>, ApiError> {
    let stats = calculate_five_unit_percentage(&pool).await?;
    Ok(Json(DataResponse::new(stats)))
}
