//! Offer repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::types::{NewOffer, OfferRow, OfferStatus};

type OfferTuple = (
    i32,
    i32,
    String,
    String,
    String,
    String,
    Option<String>,
    Option<f64>,
    DateTime<Utc>,
);

const OFFER_COLUMNS: &str = "id, user_id, title, description, category, status, image_url, \
                             estimated_value::float8, created_at";

fn into_row(
    (id, user_id, title, description, category, status, image_url, estimated_value, created_at): OfferTuple,
) -> Result<OfferRow, PostgresError> {
    let status = OfferStatus::parse(&status).ok_or(PostgresError::InvalidValue {
        column: "offers.status",
        value: status,
    })?;

    Ok(OfferRow {
        id,
        user_id,
        title,
        description,
        category,
        status,
        image_url,
        estimated_value,
        created_at,
    })
}

/// List a new offer; status starts as `available`
pub async fn create_offer(pool: &PgPool, offer: &NewOffer<'_>) -> Result<OfferRow, PostgresError> {
    let sql = format!(
        "INSERT INTO offers (user_id, title, description, category, image_url, estimated_value, status) \
         VALUES ($1, $2, $3, $4, $5, $6::numeric, $7) RETURNING {}",
        OFFER_COLUMNS
    );

    let row = sqlx::query_as::<_, OfferTuple>(&sql)
        .bind(offer.user_id)
        .bind(offer.title)
        .bind(offer.description)
        .bind(offer.category)
        .bind(offer.image_url)
        .bind(offer.estimated_value)
        .bind(OfferStatus::default().as_str())
        .fetch_one(pool)
        .await?;

    into_row(row)
}

/// Get an offer by id
pub async fn get_offer(pool: &PgPool, id: i32) -> Result<Option<OfferRow>, PostgresError> {
    let sql = format!("SELECT {} FROM offers WHERE id = $1", OFFER_COLUMNS);
    let row = sqlx::query_as::<_, OfferTuple>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(into_row).transpose()
}

/// Offers listed by a user, newest first
pub async fn list_offers_by_user(pool: &PgPool, user_id: i32) -> Result<Vec<OfferRow>, PostgresError> {
    let sql = format!(
        "SELECT {} FROM offers WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        OFFER_COLUMNS
    );
    let rows = sqlx::query_as::<_, OfferTuple>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    rows.into_iter().map(into_row).collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::postgres::test_support;

    #[tokio::test]
    #[ignore]
    async fn test_create_offer_defaults_to_available() {
        let pool = test_support::pool().await;
        let user_id = test_fixtures::account(&pool).await;

        let offer = test_fixtures::offer(&pool, user_id, "Chess set").await;
        assert_eq!(offer.status, OfferStatus::Available);
        assert_eq!(offer.estimated_value, Some(12.5));

        let fetched = get_offer(&pool, offer.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Chess set");
    }

    #[tokio::test]
    #[ignore]
    async fn test_list_offers_by_user() {
        let pool = test_support::pool().await;
        let owner = test_fixtures::account(&pool).await;
        let other = test_fixtures::account(&pool).await;

        test_fixtures::offer(&pool, owner, "Bike").await;
        test_fixtures::offer(&pool, owner, "Lamp").await;
        test_fixtures::offer(&pool, other, "Guitar").await;

        let offers = list_offers_by_user(&pool, owner).await.unwrap();
        assert_eq!(offers.len(), 2);
        assert!(offers.iter().all(|o| o.user_id == owner));
    }

    #[tokio::test]
    #[ignore]
    async fn test_get_missing_offer() {
        let pool = test_support::pool().await;
        assert!(get_offer(&pool, i32::MAX).await.unwrap().is_none());
    }
}
