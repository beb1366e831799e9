//! Student repository

use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::types::{NewStudent, StudentRow};

/// Insert a student; the school must exist
pub async fn create_student(
    pool: &PgPool,
    student: &NewStudent<'_>,
) -> Result<StudentRow, PostgresError> {
    let (id,): (i32,) = sqlx::query_as(
        r#"INSERT INTO "Student" (school_id, name, grade, math_units) VALUES ($1, $2, $3, $4) RETURNING id"#,
    )
    .bind(student.school_id)
    .bind(student.name)
    .bind(student.grade)
    .bind(student.math_units)
    .fetch_one(pool)
    .await?;

    Ok(StudentRow {
        id,
        school_id: student.school_id,
        name: Some(student.name.to_string()),
        grade: Some(student.grade.to_string()),
        math_units: Some(student.math_units),
    })
}

/// Students of one school, or of every school when `school_id` is `None`
pub async fn list_students(
    pool: &PgPool,
    school_id: Option<i32>,
) -> Result<Vec<StudentRow>, PostgresError> {
    let rows = sqlx::query_as::<_, (i32, i32, Option<String>, Option<String>, Option<i32>)>(
        r#"
        SELECT id, school_id, name, grade, math_units
        FROM "Student"
        WHERE ($1::int IS NULL OR school_id = $1)
        ORDER BY id
        "#,
    )
    .bind(school_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, school_id, name, grade, math_units)| StudentRow {
            id,
            school_id,
            name,
            grade,
            math_units,
        })
        .collect())
}

/// Number of students across all schools
pub async fn count_students(pool: &PgPool) -> Result<i64, PostgresError> {
    let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "Student""#)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::postgres::repositories::school::create_school;
    use crate::data::postgres::test_support;

    #[tokio::test]
    #[ignore]
    async fn test_students_filtered_by_school() {
        let pool = test_support::pool().await;
        let a = create_school(&pool, "Filter A", "Haifa").await.unwrap();
        let b = create_school(&pool, "Filter B", "Eilat").await.unwrap();

        for (school_id, name) in [(a.id, "Noa"), (a.id, "Dan"), (b.id, "Maya")] {
            let student = NewStudent {
                school_id,
                name,
                grade: "11",
                math_units: 4,
            };
            create_student(&pool, &student).await.unwrap();
        }

        let in_a = list_students(&pool, Some(a.id)).await.unwrap();
        assert_eq!(in_a.len(), 2);
        assert!(in_a.iter().all(|s| s.school_id == a.id));

        let all = list_students(&pool, None).await.unwrap();
        assert!(all.len() >= 3);
        assert!(count_students(&pool).await.unwrap() >= 3);
    }

    #[tokio::test]
    #[ignore]
    async fn test_student_requires_existing_school() {
        let pool = test_support::pool().await;
        let student = NewStudent {
            school_id: i32::MAX,
            name: "Orphan",
            grade: "10",
            math_units: 3,
        };
        assert!(create_student(&pool, &student).await.is_err());
    }
}
