//! Row-level batch types shared by the reader, writer, and statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::result::{MatchResult, MatchStatus};

/// One query row from the input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRow {
    pub name: String,
    /// Signed, as the input table may carry negative values.
    pub population: i64,
}

impl QueryRow {
    pub fn new(name: impl Into<String>, population: i64) -> Self {
        Self {
            name: name.into(),
            population,
        }
    }
}

/// One enriched output row. Reference columns stay blank unless `FOUND`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    pub input_name: String,
    pub input_population: i64,
    pub official_name: String,
    pub subdivision_code: String,
    pub region_name: String,
    pub record_id: String,
    pub status: MatchStatus,
}

impl OutputRow {
    pub fn from_result(query: &QueryRow, result: &MatchResult) -> Self {
        let mut row = Self {
            input_name: query.name.clone(),
            input_population: query.population,
            official_name: String::new(),
            subdivision_code: String::new(),
            region_name: String::new(),
            record_id: String::new(),
            status: result.status,
        };
        if let (MatchStatus::Found, Some(record)) = (result.status, &result.record) {
            row.official_name = record.name.clone();
            row.subdivision_code = record.subdivision_code().to_string();
            row.region_name = record.region_name().to_string();
            row.record_id = record.id_string();
        }
        row
    }
}

/// Summary counters over a processed batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    pub total_rows: usize,
    pub total_found: usize,
    pub total_not_found: usize,
    pub total_internal_error: usize,
    /// Sum of input population over `FOUND` rows, wide enough for any batch.
    pub population_found: i128,
    /// Mean input population per region, `FOUND` rows with a region only.
    pub mean_population_by_region: BTreeMap<String, f64>,
}

impl BatchStats {
    pub fn from_rows(rows: &[OutputRow]) -> Self {
        let mut stats = Self {
            total_rows: rows.len(),
            ..Self::default()
        };
        let mut region_totals: BTreeMap<&str, (i128, u64)> = BTreeMap::new();
        for row in rows {
            match row.status {
                MatchStatus::Found => {
                    stats.total_found += 1;
                    stats.population_found += i128::from(row.input_population);
                    if !row.region_name.is_empty() {
                        let entry = region_totals.entry(row.region_name.as_str()).or_default();
                        entry.0 += i128::from(row.input_population);
                        entry.1 += 1;
                    }
                }
                MatchStatus::NotFound => stats.total_not_found += 1,
                MatchStatus::InternalError => stats.total_internal_error += 1,
            }
        }
        stats.mean_population_by_region = region_totals
            .into_iter()
            .map(|(region, (sum, count))| (region.to_string(), sum as f64 / count as f64))
            .collect();
        stats
    }
}
