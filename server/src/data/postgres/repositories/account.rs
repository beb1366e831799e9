//! Account repository
//!
//! Accounts live in one of two tables depending on configuration: the barter
//! `users` table or the dashboard `"User"` table. Both enforce unique emails.

use sqlx::PgPool;

use crate::core::config::AccountTable;
use crate::data::postgres::PostgresError;
use crate::data::types::AccountRow;

type AccountTuple = (i32, String, Option<String>, String, Option<chrono::DateTime<chrono::Utc>>);

fn select_by_email_sql(table: AccountTable) -> &'static str {
    match table {
        AccountTable::Barter => {
            "SELECT id, email, username, password, created_at FROM users WHERE email = $1 ORDER BY id"
        }
        AccountTable::Dashboard => {
            r#"SELECT id, email, NULL::varchar, password, NULL::timestamptz FROM "User" WHERE email = $1 ORDER BY id"#
        }
    }
}

fn into_row((id, email, username, password_hash, created_at): AccountTuple) -> AccountRow {
    AccountRow {
        id,
        email,
        username,
        password_hash,
        created_at,
    }
}

/// Insert an account with an already-hashed password
///
/// `username` is ignored for the dashboard table. A duplicate email yields
/// `PostgresError::Conflict`.
pub async fn insert_account(
    pool: &PgPool,
    table: AccountTable,
    email: &str,
    password_hash: &str,
    username: &str,
) -> Result<AccountRow, PostgresError> {
    let row = match table {
        AccountTable::Barter => {
            sqlx::query_as::<_, AccountTuple>(
                "INSERT INTO users (username, email, password) VALUES ($1, $2, $3) \
                 RETURNING id, email, username, password, created_at",
            )
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .fetch_one(pool)
            .await
        }
        AccountTable::Dashboard => {
            sqlx::query_as::<_, AccountTuple>(
                r#"INSERT INTO "User" (email, password) VALUES ($1, $2)
                   RETURNING id, email, NULL::varchar, password, NULL::timestamptz"#,
            )
            .bind(email)
            .bind(password_hash)
            .fetch_one(pool)
            .await
        }
    }
    .map_err(|e| PostgresError::from_insert(e, "account"))?;

    Ok(into_row(row))
}

/// All accounts with the given email (zero or one given the unique constraint)
pub async fn find_by_email(
    pool: &PgPool,
    table: AccountTable,
    email: &str,
) -> Result<Vec<AccountRow>, PostgresError> {
    let rows = sqlx::query_as::<_, AccountTuple>(select_by_email_sql(table))
        .bind(email)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(into_row).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::postgres::test_support;

    fn unique_email() -> String {
        format!("{}@example.test", uuid::Uuid::new_v4().simple())
    }

    #[test]
    fn test_select_sql_targets_table() {
        assert!(select_by_email_sql(AccountTable::Barter).contains("FROM users"));
        assert!(select_by_email_sql(AccountTable::Dashboard).contains(r#"FROM "User""#));
    }

    #[tokio::test]
    #[ignore]
    async fn test_insert_then_find() {
        let pool = test_support::pool().await;
        let email = unique_email();

        let created = insert_account(&pool, AccountTable::Barter, &email, "hash", "trader")
            .await
            .unwrap();
        assert_eq!(created.username.as_deref(), Some("trader"));
        assert!(created.created_at.is_some());

        let found = find_by_email(&pool, AccountTable::Barter, &email).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, created.id);
        assert_eq!(found[0].password_hash, "hash");
    }

    #[tokio::test]
    #[ignore]
    async fn test_duplicate_email_is_conflict() {
        let pool = test_support::pool().await;
        let email = unique_email();

        for table in [AccountTable::Barter, AccountTable::Dashboard] {
            insert_account(&pool, table, &email, "hash", "a").await.unwrap();
            let err = insert_account(&pool, table, &email, "hash", "b")
                .await
                .unwrap_err();
            assert!(err.is_conflict());
            assert_eq!(find_by_email(&pool, table, &email).await.unwrap().len(), 1);
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_dashboard_accounts_have_no_username() {
        let pool = test_support::pool().await;
        let email = unique_email();

        let row = insert_account(&pool, AccountTable::Dashboard, &email, "hash", "ignored")
            .await
            .unwrap();
        assert!(row.username.is_none());
        assert!(row.created_at.is_none());
    }
}
