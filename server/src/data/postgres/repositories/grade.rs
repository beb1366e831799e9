//! Grade repository

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::types::GradeRow;

/// Record a grade for an existing student
pub async fn create_grade(
    pool: &PgPool,
    student_id: i32,
    subject: &str,
    score: i32,
    exam_date: NaiveDate,
) -> Result<GradeRow, PostgresError> {
    let (id,): (i32,) = sqlx::query_as(
        r#"INSERT INTO "Grade" (student_id, subject, score, exam_date) VALUES ($1, $2, $3, $4) RETURNING id"#,
    )
    .bind(student_id)
    .bind(subject)
    .bind(score)
    .bind(exam_date)
    .fetch_one(pool)
    .await?;

    Ok(GradeRow {
        id,
        student_id,
        subject: Some(subject.to_string()),
        score: Some(score),
        exam_date: Some(exam_date),
    })
}

/// Grades of one student, oldest exam first
pub async fn list_for_student(pool: &PgPool, student_id: i32) -> Result<Vec<GradeRow>, PostgresError> {
    let rows = sqlx::query_as::<_, (i32, i32, Option<String>, Option<i32>, Option<NaiveDate>)>(
        r#"
        SELECT id, student_id, subject, score, exam_date
        FROM "Grade"
        WHERE student_id = $1
        ORDER BY exam_date NULLS LAST, id
        "#,
    )
    .bind(student_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, student_id, subject, score, exam_date)| GradeRow {
            id,
            student_id,
            subject,
            score,
            exam_date,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::postgres::repositories::{create_school, create_student};
    use crate::data::postgres::test_support;
    use crate::data::types::NewStudent;

    #[tokio::test]
    #[ignore]
    async fn test_grades_listed_by_exam_date() {
        let pool = test_support::pool().await;
        let school = create_school(&pool, "Grades High", "Akko").await.unwrap();
        let student = create_student(
            &pool,
            &NewStudent {
                school_id: school.id,
                name: "Lior",
                grade: "12",
                math_units: 5,
            },
        )
        .await
        .unwrap();

        let later = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let earlier = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        create_grade(&pool, student.id, "Mathematics", 91, later).await.unwrap();
        create_grade(&pool, student.id, "Physics", 78, earlier).await.unwrap();

        let grades = list_for_student(&pool, student.id).await.unwrap();
        assert_eq!(grades.len(), 2);
        assert_eq!(grades[0].exam_date, Some(earlier));
        assert_eq!(grades[1].score, Some(91));
    }
}
