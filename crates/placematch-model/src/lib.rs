pub mod batch;
pub mod error;
pub mod record;
pub mod result;

pub use batch::{BatchStats, OutputRow, QueryRow};
pub use error::{ModelError, Result};
pub use record::{
    RecordId, ReferenceRecord, Region, Subdivision, SubdivisionGroup, SubdivisionGroupParent,
};
pub use result::{MatchResult, MatchStatus};
