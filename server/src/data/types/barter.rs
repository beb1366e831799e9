//! Row types for the barter marketplace tables

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{OfferStatus, TradeStatus};

/// Login account, read from either the `users` or the `"User"` table
///
/// `username` and `created_at` are always `None` for dashboard accounts.
#[derive(Debug, Clone)]
pub struct AccountRow {
    pub id: i32,
    pub email: String,
    pub username: Option<String>,
    pub password_hash: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// `offers` row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferRow {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: OfferStatus,
    pub image_url: Option<String>,
    pub estimated_value: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `offers`
#[derive(Debug, Clone)]
pub struct NewOffer<'a> {
    pub user_id: i32,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub image_url: Option<&'a str>,
    pub estimated_value: Option<f64>,
}

/// `trades` row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRow {
    pub id: i32,
    pub offer_id_1: i32,
    pub offer_id_2: i32,
    pub status: TradeStatus,
    pub created_at: DateTime<Utc>,
}

/// `messages` row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRow {
    pub id: i32,
    pub sender_id: i32,
    pub recipient_id: i32,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}
