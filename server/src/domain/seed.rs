//! Sample data for the school dashboard
//!
//! Inserts a fixed set of schools, spreads the sample students over them at
//! random, and records one mathematics grade per student dated today.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::core::constants::{SEED_GRADE_SUBJECT, SEED_SCORE_MAX, SEED_SCORE_MIN};
use crate::data::PostgresError;
use crate::data::postgres::{PgPool, repositories};
use crate::data::types::NewStudent;

const SCHOOLS: &[(&str, &str)] = &[
    ("Alef High School", "Tel Aviv"),
    ("Bet Science Academy", "Haifa"),
    ("Gimel Comprehensive", "Jerusalem"),
    ("Dalet Regional School", "Beersheba"),
    ("He Arts and Sciences", "Netanya"),
];

/// (name, grade, math units)
const STUDENTS: &[(&str, &str, i32)] = &[
    ("Noa Levi", "12", 5),
    ("Itai Cohen", "11", 4),
    ("Maya Friedman", "12", 5),
    ("Yonatan Peretz", "10", 3),
    ("Tamar Biton", "11", 5),
    ("Omer Shapira", "12", 4),
    ("Shira Avraham", "10", 3),
    ("Eitan Mizrahi", "11", 5),
    ("Yael Katz", "12", 3),
    ("Ariel Dahan", "10", 4),
    ("Roni Azulay", "11", 4),
    ("Daniel Ben David", "12", 5),
    ("Adi Golan", "10", 3),
    ("Lior Amsalem", "11", 5),
    ("Gal Rosen", "12", 4),
    ("Hila Ohana", "10", 5),
    ("Amit Sasson", "11", 3),
    ("Neta Harel", "12", 4),
    ("Ido Malka", "10", 5),
    ("Michal Segal", "11", 3),
];

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Database already has {schools} schools (use --force to seed anyway)")]
    AlreadySeeded { schools: usize },

    #[error(transparent)]
    Storage(#[from] PostgresError),
}

/// Rows inserted by a seeding run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub schools: usize,
    pub students: usize,
    pub grades: usize,
}

/// Random choices for one sample student
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    /// Index into the inserted schools
    school: usize,
    score: i32,
}

/// One placement per sample student
fn plan_placements<R: Rng>(rng: &mut R, school_count: usize, student_count: usize) -> Vec<Placement> {
    (0..student_count)
        .map(|_| Placement {
            school: rng.gen_range(0..school_count),
            score: rng.gen_range(SEED_SCORE_MIN..=SEED_SCORE_MAX),
        })
        .collect()
}

/// Insert the sample schools, students and grades
///
/// Refuses to run when schools already exist unless `force` is set.
pub async fn seed(pool: &PgPool, force: bool) -> Result<SeedReport, SeedError> {
    let existing = repositories::list_schools(pool).await?;
    if !existing.is_empty() && !force {
        return Err(SeedError::AlreadySeeded {
            schools: existing.len(),
        });
    }

    let mut report = SeedReport::default();

    let mut school_ids = Vec::with_capacity(SCHOOLS.len());
    for (name, city) in SCHOOLS {
        school_ids.push(repositories::create_school(pool, name, city).await?.id);
        report.schools += 1;
    }
    tracing::debug!(count = report.schools, "Schools inserted");

    let placements = plan_placements(&mut StdRng::from_entropy(), school_ids.len(), STUDENTS.len());
    let today = chrono::Utc::now().date_naive();

    for (&(name, grade, math_units), placement) in STUDENTS.iter().zip(placements) {
        let student = NewStudent {
            school_id: school_ids[placement.school],
            name,
            grade,
            math_units,
        };
        let student = repositories::create_student(pool, &student).await?;
        report.students += 1;

        repositories::create_grade(pool, student.id, SEED_GRADE_SUBJECT, placement.score, today)
            .await?;
        report.grades += 1;
    }
    tracing::debug!(
        students = report.students,
        grades = report.grades,
        "Students and grades inserted"
    );

    Ok(report)
}
