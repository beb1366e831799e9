//! Shared row types for the PostgreSQL repositories

pub mod barter;
pub mod dashboard;
pub mod enums;

pub use barter::{AccountRow, MessageRow, NewOffer, OfferRow, TradeRow};
pub use dashboard::{GradeRow, NewStudent, SchoolRow, SchoolStudentCounts, StudentRow};
pub use enums::{OfferStatus, TradeStatus};
