//! PostgreSQL repositories
//!
//! Free async functions over a `&PgPool`. Row types live in `crate::data::types`.

pub mod account;
pub mod grade;
pub mod message;
pub mod offer;
pub mod school;
pub mod stats;
pub mod student;
pub mod trade;

pub use account::{find_by_email as find_accounts_by_email, insert_account};
pub use grade::{create_grade, list_for_student as list_grades_for_student};
pub use message::{create_message, list_conversation};
pub use offer::{create_offer, get_offer, list_offers_by_user};
pub use school::{create_school, list_schools};
pub use stats::five_unit_counts;
pub use student::{count_students, create_student, list_students};
pub use trade::{create_trade, list_trades_for_offer};
