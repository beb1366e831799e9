//! Five-unit mathematics percentage per school

use serde::Serialize;

use crate::data::PostgresError;
use crate::data::postgres::{PgPool, repositories};
use crate::data::types::SchoolStudentCounts;

/// One school's share of students on the five-unit mathematics track
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FiveUnitStat {
    pub school: String,
    pub total_students: i64,
    pub five_unit_students: i64,
    /// Two-decimal percentage, e.g. `"30.00"`
    pub percentage: String,
}

impl From<SchoolStudentCounts> for FiveUnitStat {
    fn from(counts: SchoolStudentCounts) -> Self {
        Self {
            percentage: five_unit_percentage(counts.total_students, counts.five_unit_students),
            school: counts.school,
            total_students: counts.total_students,
            five_unit_students: counts.five_unit_students,
        }
    }
}

/// Format `five / total * 100` with two decimals; a school without students is `"0.00"`
///
/// Ties round half up (`0.125` becomes `"0.13"`).
pub fn five_unit_percentage(total_students: i64, five_unit_students: i64) -> String {
    if total_students <= 0 {
        return "0.00".to_string();
    }
    // hundredths of a percent, rounded half up in integer arithmetic
    let hundredths = (five_unit_students * 10_000 * 2 + total_students) / (2 * total_students);
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

/// Stats for every school, ordered by school id
pub async fn calculate_five_unit_percentage(pool: &PgPool) -> Result<Vec<FiveUnitStat>, PostgresError> {
    let counts = repositories::five_unit_counts(pool).await?;
    tracing::debug!(schools = counts.len(), "Computed five-unit counts");
    Ok(counts.into_iter().map(FiveUnitStat::from).collect())
}
