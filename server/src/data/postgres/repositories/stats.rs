//! Aggregations over the dashboard tables

use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::types::SchoolStudentCounts;

/// Total and five-unit student counts for every school, ordered by school id
///
/// Schools without students are included with zero counts.
pub async fn five_unit_counts(pool: &PgPool) -> Result<Vec<SchoolStudentCounts>, PostgresError> {
    let rows = sqlx::query_as::<_, (i32, String, i64, i64)>(
        r#"
        SELECT
            s.id,
            s.name,
            COUNT(st.id) AS total_students,
            COUNT(st.id) FILTER (WHERE st.math_units = 5) AS five_unit_students
        FROM "School" s
        LEFT JOIN "Student" st ON st.school_id = s.id
        GROUP BY s.id, s.name
        ORDER BY s.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(
            |(school_id, school, total_students, five_unit_students)| SchoolStudentCounts {
                school_id,
                school,
                total_students,
                five_unit_students,
            },
        )
        .collect())
}
