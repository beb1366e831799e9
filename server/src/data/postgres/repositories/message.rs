//! Direct messages between barter users

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::types::MessageRow;

type MessageTuple = (i32, i32, i32, String, DateTime<Utc>);

fn into_row((id, sender_id, recipient_id, content, sent_at): MessageTuple) -> MessageRow {
    MessageRow {
        id,
        sender_id,
        recipient_id,
        content,
        sent_at,
    }
}

/// Send a message
pub async fn create_message(
    pool: &PgPool,
    sender_id: i32,
    recipient_id: i32,
    content: &str,
) -> Result<MessageRow, PostgresError> {
    let row = sqlx::query_as::<_, MessageTuple>(
        "INSERT INTO messages (sender_id, recipient_id, content) VALUES ($1, $2, $3) \
         RETURNING id, sender_id, recipient_id, content, sent_at",
    )
    .bind(sender_id)
    .bind(recipient_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(into_row(row))
}

/// Messages exchanged between two users in either direction, oldest first
pub async fn list_conversation(pool: &PgPool, a: i32, b: i32) -> Result<Vec<MessageRow>, PostgresError> {
    let rows = sqlx::query_as::<_, MessageTuple>(
        r#"
        SELECT id, sender_id, recipient_id, content, sent_at
        FROM messages
        WHERE (sender_id = $1 AND recipient_id = $2)
           OR (sender_id = $2 AND recipient_id = $1)
        ORDER BY sent_at, id
        "#,
    )
    .bind(a)
    .bind(b)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(into_row).collect())
}
