//! School repository

use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::types::SchoolRow;

/// Insert a school
pub async fn create_school(pool: &PgPool, name: &str, city: &str) -> Result<SchoolRow, PostgresError> {
    let (id,): (i32,) =
        sqlx::query_as(r#"INSERT INTO "School" (name, city) VALUES ($1, $2) RETURNING id"#)
            .bind(name)
            .bind(city)
            .fetch_one(pool)
            .await?;

    Ok(SchoolRow {
        id,
        name: name.to_string(),
        city: city.to_string(),
    })
}

/// All schools ordered by id
pub async fn list_schools(pool: &PgPool) -> Result<Vec<SchoolRow>, PostgresError> {
    let rows = sqlx::query_as::<_, (i32, String, String)>(
        r#"SELECT id, name, city FROM "School" ORDER BY id"#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name, city)| SchoolRow { id, name, city })
        .collect())
}
