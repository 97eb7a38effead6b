//! Query CSV reading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use placematch_model::QueryRow;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Accepted headers for the name column, matched case-insensitively.
pub const NAME_COLUMNS: &[&str] = &["municipio", "name"];
/// Accepted headers for the optional population column.
pub const POPULATION_COLUMNS: &[&str] = &["populacao", "population"];

/// Reads query rows from a CSV file with a header row.
pub fn read_queries(path: &Path) -> Result<Vec<QueryRow>> {
    let file = File::open(path).map_err(|e| IngestError::read(path, e))?;
    read_queries_from(file, path)
}

/// Reads query rows from any reader; `source` is used in errors and logs.
///
/// Cells are trimmed. Populations are signed integers; a missing or
/// unparseable value becomes 0.
pub fn read_queries_from<R: Read>(reader: R, source: &Path) -> Result<Vec<QueryRow>> {
    let csv_error = |e: csv::Error| IngestError::Csv {
        path: source.to_path_buf(),
        source: e,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();

    let name_idx =
        find_column(&headers, NAME_COLUMNS).ok_or_else(|| IngestError::MissingColumn {
            column: NAME_COLUMNS[0].to_string(),
            path: source.to_path_buf(),
        })?;
    let population_idx = find_column(&headers, POPULATION_COLUMNS);
    if population_idx.is_none() {
        warn!(path = %source.display(), "no population column, using 0 for every row");
    }

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        let name = record.get(name_idx).map(normalize_cell).unwrap_or_default();
        let raw_population = population_idx
            .and_then(|idx| record.get(idx))
            .map(normalize_cell)
            .unwrap_or_default();
        let population = raw_population.parse::<i64>().unwrap_or_else(|_| {
            if population_idx.is_some() {
                debug!(row = line + 1, value = %raw_population, "population not a number, using 0");
            }
            0
        });
        rows.push(QueryRow { name, population });
    }
    debug!(path = %source.display(), row_count = rows.len(), "query rows read");
    Ok(rows)
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_lowercase()
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn find_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|candidate| headers.iter().position(|header| header == candidate))
}
