//! Result table and statistics writers.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use placematch_model::{BatchStats, OutputRow};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Writes one CSV row per output row, with a header.
pub fn write_results(path: &Path, rows: &[OutputRow]) -> Result<()> {
    let file = File::create(path).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_results_to(file, rows, path)?;
    debug!(path = %path.display(), row_count = rows.len(), "results written");
    Ok(())
}

/// Writes result rows to any writer; `target` is used in errors.
pub fn write_results_to<W: Write>(writer: W, rows: &[OutputRow], target: &Path) -> Result<()> {
    let csv_error = |e: csv::Error| IngestError::Csv {
        path: target.to_path_buf(),
        source: e,
    };
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row).map_err(csv_error)?;
    }
    if rows.is_empty() {
        writer.write_record(OUTPUT_HEADERS).map_err(csv_error)?;
    }
    writer.flush().map_err(|e| IngestError::FileWrite {
        path: target.to_path_buf(),
        source: e,
    })
}

/// Header row used when there are no rows to derive it from.
const OUTPUT_HEADERS: [&str; 7] = [
    "input_name",
    "input_population",
    "official_name",
    "subdivision_code",
    "region_name",
    "record_id",
    "status",
];

/// Writes batch statistics as pretty-printed JSON.
pub fn write_stats(path: &Path, stats: &BatchStats) -> Result<()> {
    let json = serde_json::to_string_pretty(stats).map_err(|e| IngestError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    fs::write(path, json).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
