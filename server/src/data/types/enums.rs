//! Status enumerations for barter rows
//!
//! Stored as lowercase snake_case strings and constrained by CHECK clauses in
//! the schema, so a value outside these sets never reaches the application.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of an offer listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    #[default]
    Available,
    Exchanged,
}

impl OfferStatus {
    pub const ALL: [Self; 2] = [Self::Available, Self::Exchanged];

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "available" => Some(Self::Available),
            "exchanged" => Some(Self::Exchanged),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Exchanged => "exchanged",
        }
    }
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Negotiation state of a trade between two offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TradeStatus {
    #[default]
    InProcess,
    Pending,
    Completed,
}

impl TradeStatus {
    pub const ALL: [Self; 3] = [Self::InProcess, Self::Pending, Self::Completed];

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "in_process" => Some(Self::InProcess),
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProcess => "in_process",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
