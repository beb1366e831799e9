//! Application logic on top of the data layer
//!
//! - `accounts` - registration, password hashing and login checks
//! - `seed` - sample dashboard data
//! - `stats` - five-unit mathematics percentages

pub mod accounts;
pub mod seed;
pub mod stats;

pub use accounts::{AccountError, AccountService, RegisterOutcome};
pub use seed::{SeedError, SeedReport, seed};
pub use stats::{FiveUnitStat, calculate_five_unit_percentage};
