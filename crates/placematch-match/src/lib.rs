//! Entity resolution for free-text place names.
//!
//! Names are folded to a [`NormalizedKey`] and looked up in a [`RegistryIndex`]
//! built once from the reference registry. The [`Matcher`] tries an exact key
//! lookup first, then a sequence-similarity search over all distinct keys.
//!
//! ```ignore
//! use placematch_match::{MatchConfig, Matcher, RegistryIndex};
//!
//! let index = RegistryIndex::new(records);
//! let matcher = Matcher::new(&index, MatchConfig::default())?;
//! let result = matcher.resolve("Sao Goncalo")?;
//! ```

#![deny(unsafe_code)]

mod config;
mod disambiguate;
mod error;
mod index;
mod matcher;
mod normalize;
mod similarity;

pub use config::MatchConfig;
pub use disambiguate::Disambiguator;
pub use error::{MatchError, Result};
pub use index::{KeyGroup, RegistryIndex};
pub use matcher::{MatchStage, MatchTrace, Matcher, NameResolver};
pub use normalize::{NormalizedKey, normalize};
pub use similarity::{ScoredKey, SequenceScorer, close_matches, sequence_ratio};
