//! Tunable matching parameters.

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// Matching parameters, passed to the [`Matcher`](crate::Matcher) at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Minimum similarity for an approximate candidate (default: 0.75).
    pub similarity_cutoff: f64,
    /// Number of approximate candidates retained (default: 3).
    pub max_candidates: usize,
    /// Region preferred when several records share a key (default: `Sudeste`).
    pub preferred_region: String,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            similarity_cutoff: 0.75,
            max_candidates: 3,
            preferred_region: "Sudeste".to_string(),
        }
    }
}

impl MatchConfig {
    #[must_use]
    pub fn with_similarity_cutoff(mut self, cutoff: f64) -> Self {
        self.similarity_cutoff = cutoff;
        self
    }

    #[must_use]
    pub fn with_max_candidates(mut self, count: usize) -> Self {
        self.max_candidates = count;
        self
    }

    #[must_use]
    pub fn with_preferred_region(mut self, region: impl Into<String>) -> Self {
        self.preferred_region = region.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_cutoff) {
            return Err(MatchError::InvalidConfig {
                field: "similarity_cutoff",
                reason: format!("must be within 0.0..=1.0, got {}", self.similarity_cutoff),
            });
        }
        if self.max_candidates == 0 {
            return Err(MatchError::InvalidConfig {
                field: "max_candidates",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = MatchConfig::default();
        assert_eq!(config.similarity_cutoff, 0.75);
        assert_eq!(config.max_candidates, 3);
        assert_eq!(config.preferred_region, "Sudeste");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_cutoff() {
        for cutoff in [-0.1, 1.5, f64::NAN] {
            let err = MatchConfig::default()
                .with_similarity_cutoff(cutoff)
                .validate()
                .unwrap_err();
            assert!(matches!(err, MatchError::InvalidConfig { field: "similarity_cutoff", .. }));
        }
    }

    #[test]
    fn rejects_zero_candidates() {
        let err = MatchConfig::default().with_max_candidates(0).validate().unwrap_err();
        assert!(matches!(err, MatchError::InvalidConfig { field: "max_candidates", .. }));
    }
}
