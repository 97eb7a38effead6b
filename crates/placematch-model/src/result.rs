use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::ReferenceRecord;

/// Outcome category of a single resolution.
///
/// The matcher only produces `Found` and `NotFound`; `InternalError` is
/// assigned by the batch driver when resolution itself fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Found,
    NotFound,
    InternalError,
}

impl MatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Found => "FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status plus the matched record; `record` is set only for `Found`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub status: MatchStatus,
    pub record: Option<ReferenceRecord>,
}

impl MatchResult {
    pub fn found(record: ReferenceRecord) -> Self {
        Self {
            status: MatchStatus::Found,
            record: Some(record),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: MatchStatus::NotFound,
            record: None,
        }
    }

    pub fn internal_error() -> Self {
        Self {
            status: MatchStatus::InternalError,
            record: None,
        }
    }

    pub fn is_found(&self) -> bool {
        self.status == MatchStatus::Found
    }
}
