//! Reading-list bookkeeping: a customer's relationship to a book,
//! independent of any single loan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Which bucket a book sits in for a customer.
/// Persisted as the legacy single-character codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    Want,
    Reading,
    Read,
}

impl ReadingStatus {
    pub fn as_code(&self) -> &'static str {
        match self {
            ReadingStatus::Want => "W",
            ReadingStatus::Reading => "R",
            ReadingStatus::Read => "D",
        }
    }
}

impl From<&str> for ReadingStatus {
    fn from(s: &str) -> Self {
        match s {
            "R" => ReadingStatus::Reading,
            "D" => ReadingStatus::Read,
            _ => ReadingStatus::Want,
        }
    }
}

/// One reading-list row joined with its book title
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ReadingListEntry {
    pub isbn: String,
    pub title: String,
    /// Legacy status code ("W", "R" or "D")
    pub status: String,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip() {
        for status in [ReadingStatus::Want, ReadingStatus::Reading, ReadingStatus::Read] {
            assert_eq!(ReadingStatus::from(status.as_code()), status);
        }
    }
}
