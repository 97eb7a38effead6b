//! Registry snapshot loading.

use std::fs;
use std::path::Path;

use placematch_model::ReferenceRecord;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Reads a registry snapshot: a JSON array with one object per entity.
pub fn load_registry(path: &Path) -> Result<Vec<ReferenceRecord>> {
    let text = fs::read_to_string(path).map_err(|e| IngestError::read(path, e))?;
    parse_registry(&text, path)
}

/// Parses snapshot text; `source` is only used in error messages.
///
/// Entries keep their order. An entry that is not an object is kept as an
/// empty record so that positions and counts still line up with the payload.
pub fn parse_registry(text: &str, source: &Path) -> Result<Vec<ReferenceRecord>> {
    let value: Value = serde_json::from_str(text).map_err(|e| IngestError::Json {
        path: source.to_path_buf(),
        source: e,
    })?;
    let Value::Array(entries) = value else {
        return Err(IngestError::RegistryFormat {
            path: source.to_path_buf(),
            reason: "top-level value must be an array of entries".to_string(),
        });
    };

    let records: Vec<ReferenceRecord> = entries
        .into_iter()
        .enumerate()
        .map(|(position, entry)| {
            ReferenceRecord::from_value(entry).unwrap_or_else(|error| {
                warn!(position, %error, "registry entry kept as empty record");
                ReferenceRecord::default()
            })
        })
        .collect();
    debug!(
        path = %source.display(),
        record_count = records.len(),
        "registry snapshot parsed"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_in_order() {
        let text = r#"[
            {"id": 1, "nome": "Curitiba"},
            {"id": 2, "nome": "Niterói"}
        ]"#;
        let records = parse_registry(text, Path::new("inline.json")).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Curitiba", "Niterói"]);
    }

    #[test]
    fn keeps_non_object_entries() {
        let records = parse_registry(r#"[{"nome": "A"}, 7, null]"#, Path::new("x.json")).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], ReferenceRecord::default());
    }

    #[test]
    fn entry_with_alias_keys_keeps_its_data() {
        let text = r#"[{"id": 1, "nome": "Niterói", "name": "Niteroi",
            "microrregiao": {"mesorregiao": {"UF": {"sigla": "RJ", "regiao": {"nome": "Sudeste"}}}}}]"#;
        let records = parse_registry(text, Path::new("x.json")).unwrap();
        assert_eq!(records[0].name, "Niterói");
        assert_eq!(records[0].region_name(), "Sudeste");
    }

    #[test]
    fn rejects_non_array() {
        let err = parse_registry(r#"{"nome": "A"}"#, Path::new("x.json")).unwrap_err();
        assert!(matches!(err, IngestError::RegistryFormat { .. }));
    }

    #[test]
    fn rejects_invalid_json() {
        let err = parse_registry("[{", Path::new("x.json")).unwrap_err();
        assert!(matches!(err, IngestError::Json { .. }));
    }
}
