//! Row types for the school statistics tables

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// `"School"` row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolRow {
    pub id: i32,
    pub name: String,
    pub city: String,
}

/// `"Student"` row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRow {
    pub id: i32,
    pub school_id: i32,
    pub name: Option<String>,
    pub grade: Option<String>,
    pub math_units: Option<i32>,
}

/// Insert payload for `"Student"`
#[derive(Debug, Clone)]
pub struct NewStudent<'a> {
    pub school_id: i32,
    pub name: &'a str,
    pub grade: &'a str,
    pub math_units: i32,
}

/// `"Grade"` row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRow {
    pub id: i32,
    pub student_id: i32,
    pub subject: Option<String>,
    pub score: Option<i32>,
    pub exam_date: Option<NaiveDate>,
}

/// Per-school student counts feeding the five-unit percentage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolStudentCounts {
    pub school_id: i32,
    pub school: String,
    pub total_students: i64,
    pub five_unit_students: i64,
}
