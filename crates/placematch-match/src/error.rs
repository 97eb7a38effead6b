//! Error types for matching operations.

use thiserror::Error;

/// Errors raised by the matcher.
///
/// Policy outcomes (no candidate, ambiguous approximate candidate) are not
/// errors; these variants only cover invalid configuration and a broken index.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// Configuration value outside its valid range.
    #[error("invalid match configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },
    /// A key group with no records.
    #[error("key group '{key}' has no records")]
    EmptyGroup { key: String },
    /// A candidate key without a group in the index.
    #[error("candidate key '{key}' is missing from the registry index")]
    MissingGroup { key: String },
}

/// Result type for matching operations.
pub type Result<T> = std::result::Result<T, MatchError>;
