//! Error types for batch I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading inputs or writing outputs.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or write file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Registry Errors ===
    /// Registry snapshot is not valid JSON.
    #[error("invalid registry JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Registry snapshot is valid JSON but not an array of entries.
    #[error("unexpected registry format in {path}: {reason}")]
    RegistryFormat { path: PathBuf, reason: String },

    // === CSV Errors ===
    /// Failed to parse or write CSV.
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Required column not found in the header row.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },
}

impl IngestError {
    pub(crate) fn read(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::MissingColumn {
            column: "municipio".to_string(),
            path: PathBuf::from("/data/input.csv"),
        };
        assert_eq!(
            err.to_string(),
            "required column 'municipio' not found in /data/input.csv"
        );
    }

    #[test]
    fn test_not_found_is_classified() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = IngestError::read(std::path::Path::new("missing.json"), io);
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }
}
