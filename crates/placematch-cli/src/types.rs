use std::path::PathBuf;
use std::time::Duration;

use placematch_model::BatchStats;

#[derive(Debug)]
pub struct RunSummary {
    pub registry_records: usize,
    pub registry_keys: usize,
    pub output_path: PathBuf,
    pub stats_path: Option<PathBuf>,
    pub stats: BatchStats,
    pub elapsed: Duration,
}
