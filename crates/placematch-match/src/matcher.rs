//! Matcher implementation.

use placematch_model::{MatchResult, ReferenceRecord};
use tracing::trace;

use crate::config::MatchConfig;
use crate::disambiguate::Disambiguator;
use crate::error::{MatchError, Result};
use crate::index::{KeyGroup, RegistryIndex};
use crate::normalize::{NormalizedKey, normalize};
use crate::similarity::close_matches;

/// Where a resolution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStage {
    /// The normalized key exists in the index.
    Exact,
    /// A single-record group was reached by similarity.
    Approximate,
    /// The best approximate candidate is shared by several records.
    AmbiguousApproximate,
    /// No exact key and no candidate above the cutoff.
    NoCandidate,
}

impl MatchStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Approximate => "approximate",
            Self::AmbiguousApproximate => "ambiguous approximate",
            Self::NoCandidate => "no candidate",
        }
    }
}

/// Full account of one resolution, for diagnostics.
#[derive(Debug, Clone)]
pub struct MatchTrace {
    pub key: NormalizedKey,
    pub stage: MatchStage,
    /// Approximate candidates, best first; empty for exact hits.
    pub candidates: Vec<(String, f64)>,
    /// Size of the group the decision was made on.
    pub group_size: usize,
    pub result: MatchResult,
}

/// Anything that turns one input name into a [`MatchResult`].
///
/// Batch drivers depend on this rather than on [`Matcher`] directly.
pub trait NameResolver {
    fn resolve(&self, name: &str) -> Result<MatchResult>;
}

/// Resolves free-text names against a [`RegistryIndex`].
///
/// Stateless between calls. Exact key hits always resolve, with the
/// [`Disambiguator`] choosing among duplicates. Approximate hits resolve only
/// when the best candidate key belongs to a single record.
#[derive(Debug, Clone)]
pub struct Matcher<'a> {
    index: &'a RegistryIndex,
    config: MatchConfig,
    disambiguator: Disambiguator,
}

impl<'a> Matcher<'a> {
    pub fn new(index: &'a RegistryIndex, config: MatchConfig) -> Result<Self> {
        config.validate()?;
        let disambiguator = Disambiguator::new(config.preferred_region.clone());
        Ok(Self {
            index,
            config,
            disambiguator,
        })
    }

    /// Configuration the matcher was built with.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Index the matcher resolves against.
    pub fn index(&self) -> &'a RegistryIndex {
        self.index
    }

    /// Resolves one name to `FOUND` or `NOT_FOUND`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the index is inconsistent; callers should
    /// treat it as a row-level internal error.
    pub fn resolve(&self, name: &str) -> Result<MatchResult> {
        self.explain(name).map(|trace| trace.result)
    }

    /// Like [`Self::resolve`], also reporting the stage and candidates.
    pub fn explain(&self, name: &str) -> Result<MatchTrace> {
        let key = normalize(name);

        if let Some(group) = self.index.lookup_exact(key.as_str()) {
            let record = self.pick_exact(group)?.clone();
            trace!(
                key = key.as_str(),
                group_size = group.len(),
                preferred_region = self.disambiguator.preferred_region(),
                chosen_region = record.region_name(),
                "exact match"
            );
            return Ok(MatchTrace {
                stage: MatchStage::Exact,
                candidates: Vec::new(),
                group_size: group.len(),
                result: MatchResult::found(record),
                key,
            });
        }

        let scored = close_matches(
            key.as_str(),
            self.index.candidate_keys(),
            self.config.similarity_cutoff,
            self.config.max_candidates,
        );
        let candidates: Vec<(String, f64)> = scored
            .iter()
            .map(|candidate| (candidate.key.as_str().to_string(), candidate.score))
            .collect();

        let Some(best) = scored.first() else {
            trace!(key = key.as_str(), "no candidate above cutoff");
            return Ok(MatchTrace {
                key,
                stage: MatchStage::NoCandidate,
                candidates,
                group_size: 0,
                result: MatchResult::not_found(),
            });
        };

        let group = self
            .index
            .lookup_exact(best.key.as_str())
            .ok_or_else(|| MatchError::MissingGroup {
                key: best.key.as_str().to_string(),
            })?;
        if group.is_empty() {
            return Err(MatchError::EmptyGroup {
                key: best.key.as_str().to_string(),
            });
        }

        let (stage, result) = match group.single() {
            Some(record) => (MatchStage::Approximate, MatchResult::found(record.clone())),
            None => (MatchStage::AmbiguousApproximate, MatchResult::not_found()),
        };
        trace!(
            key = key.as_str(),
            candidate = best.key.as_str(),
            score = best.score,
            group_size = group.len(),
            stage = stage.as_str(),
            "approximate match"
        );
        Ok(MatchTrace {
            key,
            stage,
            candidates,
            group_size: group.len(),
            result,
        })
    }

    fn pick_exact(&self, group: KeyGroup<'a>) -> Result<&'a ReferenceRecord> {
        let chosen = match group.single() {
            Some(record) => Some(record),
            None => self.disambiguator.choose(group.iter()),
        };
        chosen.ok_or_else(|| MatchError::EmptyGroup {
            key: group.key().as_str().to_string(),
        })
    }
}

impl NameResolver for Matcher<'_> {
    fn resolve(&self, name: &str) -> Result<MatchResult> {
        Matcher::resolve(self, name)
    }
}
