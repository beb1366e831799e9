//! Trade repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::types::{TradeRow, TradeStatus};

type TradeTuple = (i32, i32, i32, String, DateTime<Utc>);

fn into_row((id, offer_id_1, offer_id_2, status, created_at): TradeTuple) -> Result<TradeRow, PostgresError> {
    let status = TradeStatus::parse(&status).ok_or(PostgresError::InvalidValue {
        column: "trades.status",
        value: status,
    })?;

    Ok(TradeRow {
        id,
        offer_id_1,
        offer_id_2,
        status,
        created_at,
    })
}

/// Pair two distinct offers in a trade
pub async fn create_trade(
    pool: &PgPool,
    offer_id_1: i32,
    offer_id_2: i32,
    status: TradeStatus,
) -> Result<TradeRow, PostgresError> {
    let row = sqlx::query_as::<_, TradeTuple>(
        "INSERT INTO trades (offer_id_1, offer_id_2, status) VALUES ($1, $2, $3) \
         RETURNING id, offer_id_1, offer_id_2, status, created_at",
    )
    .bind(offer_id_1)
    .bind(offer_id_2)
    .bind(status.as_str())
    .fetch_one(pool)
    .await?;

    into_row(row)
}

/// Trades involving an offer on either side
pub async fn list_trades_for_offer(pool: &PgPool, offer_id: i32) -> Result<Vec<TradeRow>, PostgresError> {
    let rows = sqlx::query_as::<_, TradeTuple>(
        r#"
        SELECT id, offer_id_1, offer_id_2, status, created_at
        FROM trades
        WHERE offer_id_1 = $1 OR offer_id_2 = $1
        ORDER BY created_at, id
        "#,
    )
    .bind(offer_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(into_row).collect()
}
