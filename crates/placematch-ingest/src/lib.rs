//! Batch I/O for place-name matching.
//!
//! # Features
//!
//! - **Registry Loading**: Read a downloaded registry snapshot (JSON array)
//! - **Query Reading**: Read the input CSV of names and populations
//! - **Result Writing**: Write enriched rows as CSV and batch statistics as JSON
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use placematch_ingest::{load_registry, read_queries, write_results};
//!
//! let records = load_registry(Path::new("municipios.json"))?;
//! let queries = read_queries(Path::new("input.csv"))?;
//! ```

mod error;
mod output;
mod queries;
mod registry;

// === Error Types ===
pub use error::{IngestError, Result};

// === Registry Snapshot ===
pub use registry::{load_registry, parse_registry};

// === Query Input ===
pub use queries::{NAME_COLUMNS, POPULATION_COLUMNS, read_queries, read_queries_from};

// === Output ===
pub use output::{write_results, write_results_to, write_stats};
