//! Case lifecycle status enumeration.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle status of a case.
///
/// Serialises to the wire names (`"OPEN"`, `"IN_PROGRESS"`, ...) used by the
/// REST API and the persistence layer. Any status may replace any other via
/// update; there is no enforced transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    /// Case is newly created and open for processing.
    Open,
    /// Case is currently being worked on.
    InProgress,
    /// Case has been completed and closed.
    Closed,
    /// Case has been cancelled and will not be processed further.
    Cancelled,
}

impl CaseStatus {
    /// All statuses in declaration order.
    #[must_use]
    pub const fn values() -> [Self; 4] {
        [Self::Open, Self::InProgress, Self::Closed, Self::Cancelled]
    }

    /// Wire name used in JSON payloads and the database `status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Closed => "CLOSED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Human-readable display name for UI formatting.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Closed => "Closed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown case status: {value}")]
pub struct ParseCaseStatusError {
    /// The rejected input.
    pub value: String,
}

impl std::str::FromStr for CaseStatus {
    type Err = ParseCaseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "CLOSED" => Ok(Self::Closed),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(ParseCaseStatusError {
                value: other.to_owned(),
            }),
        }
    }
}
