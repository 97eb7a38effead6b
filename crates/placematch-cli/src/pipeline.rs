//! Batch driver: resolves query rows one by one and folds the statistics.

use std::path::{Path, PathBuf};

use placematch_match::NameResolver;
use placematch_model::{BatchStats, MatchResult, OutputRow, QueryRow};
use tracing::{trace, warn};

/// File name of the result table when no output path is given.
pub const DEFAULT_OUTPUT_FILE: &str = "resultado.csv";

/// Rows and statistics produced by one batch.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub rows: Vec<OutputRow>,
    pub stats: BatchStats,
}

/// Resolves every query row in input order.
///
/// A row whose resolution fails is recorded as `INTERNAL_ERROR` and the batch
/// continues. Output rows correspond one-to-one with `queries`.
pub fn process_rows<R>(resolver: &R, queries: &[QueryRow]) -> BatchOutcome
where
    R: NameResolver + ?Sized,
{
    let mut rows = Vec::with_capacity(queries.len());
    for (position, query) in queries.iter().enumerate() {
        let result = match resolver.resolve(&query.name) {
            Ok(result) => result,
            Err(error) => {
                warn!(
                    row = position + 1,
                    name = %query.name,
                    %error,
                    "resolution failed; row recorded as internal error"
                );
                MatchResult::internal_error()
            }
        };
        trace!(row = position + 1, status = %result.status, "row resolved");
        rows.push(OutputRow::from_result(query, &result));
    }
    let stats = BatchStats::from_rows(&rows);
    BatchOutcome { rows, stats }
}

/// Default result path: [`DEFAULT_OUTPUT_FILE`] next to the input table.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_file_name(DEFAULT_OUTPUT_FILE)
}
