//! Reference registry records.
//!
//! Records mirror the IBGE municipality payload: the display name sits at the
//! top level and the state and macro-region are nested three levels deep
//! (`microrregiao.mesorregiao.UF`). Every nested level is optional and decodes
//! leniently, so a partially broken entry still yields a usable record with an
//! empty subdivision code and region name.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{ModelError, Result};

/// Registry identifier, numeric in the IBGE payload but accepted as text too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One canonical entity from the reference registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<RecordId>,
    /// Official display name.
    #[serde(
        rename = "nome",
        alias = "name",
        alias = "officialName",
        default,
        deserialize_with = "lenient_string"
    )]
    pub name: String,
    #[serde(
        rename = "microrregiao",
        alias = "subdivisionGroup",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<SubdivisionGroup>,
}

/// Innermost grouping level (IBGE microregion).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubdivisionGroup {
    #[serde(
        rename = "mesorregiao",
        alias = "subdivisionGroupParent",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent: Option<SubdivisionGroupParent>,
}

/// Intermediate grouping level (IBGE mesoregion).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubdivisionGroupParent {
    #[serde(
        rename = "UF",
        alias = "subdivision",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub subdivision: Option<Subdivision>,
}

/// Administrative subdivision (federative unit / state).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subdivision {
    /// Short code, e.g. `SP`.
    #[serde(
        rename = "sigla",
        alias = "code",
        default,
        deserialize_with = "lenient_string"
    )]
    pub code: String,
    #[serde(
        rename = "regiao",
        alias = "region",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub region: Option<Region>,
}

/// Geographic macro-region, e.g. `Sudeste`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    #[serde(
        rename = "nome",
        alias = "name",
        default,
        deserialize_with = "lenient_string"
    )]
    pub name: String,
}

impl ReferenceRecord {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            location: None,
        }
    }

    /// Attach a full location hierarchy ending in `code` and `region`.
    #[must_use]
    pub fn with_location(mut self, code: impl Into<String>, region: impl Into<String>) -> Self {
        self.location = Some(SubdivisionGroup {
            parent: Some(SubdivisionGroupParent {
                subdivision: Some(Subdivision {
                    code: code.into(),
                    region: Some(Region {
                        name: region.into(),
                    }),
                }),
            }),
        });
        self
    }

    /// Decode one raw registry entry.
    ///
    /// Only the top-level shape is checked: anything that is a JSON object
    /// decodes, with missing or mistyped fields left empty. When a level
    /// carries both the IBGE key and a generic alias, the IBGE key wins.
    pub fn from_value(mut value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ModelError::NotAnObject {
                kind: value_kind(&value),
            });
        }
        prefer_canonical_keys(&mut value);
        Ok(serde_json::from_value(value)?)
    }

    /// Walks the location hierarchy; `None` if any level is absent.
    pub fn subdivision(&self) -> Option<&Subdivision> {
        self.location.as_ref()?.parent.as_ref()?.subdivision.as_ref()
    }

    /// Subdivision code, empty when the hierarchy is incomplete.
    pub fn subdivision_code(&self) -> &str {
        self.subdivision().map_or("", |subdivision| subdivision.code.as_str())
    }

    pub fn region(&self) -> Option<&Region> {
        self.subdivision()?.region.as_ref()
    }

    /// Region name, empty when the hierarchy is incomplete.
    pub fn region_name(&self) -> &str {
        self.region().map_or("", |region| region.name.as_str())
    }

    /// Identifier rendered for display, empty when absent.
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(ToString::to_string).unwrap_or_default()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Drops alias keys shadowed by a higher-priority key at every level.
fn prefer_canonical_keys(value: &mut Value) {
    let Some(record) = value.as_object_mut() else {
        return;
    };
    keep_first_present(record, &["nome", "name", "officialName"]);
    let Some(group) = keep_first_present(record, &["microrregiao", "subdivisionGroup"]) else {
        return;
    };
    let Some(parent) = keep_first_present(group, &["mesorregiao", "subdivisionGroupParent"])
    else {
        return;
    };
    let Some(subdivision) = keep_first_present(parent, &["UF", "subdivision"]) else {
        return;
    };
    keep_first_present(subdivision, &["sigla", "code"]);
    if let Some(region) = keep_first_present(subdivision, &["regiao", "region"]) {
        keep_first_present(region, &["nome", "name"]);
    }
}

/// Keeps the first of `keys` present in `object`, removing the rest, and
/// returns the kept value when it is itself an object.
fn keep_first_present<'a>(
    object: &'a mut Map<String, Value>,
    keys: &[&str],
) -> Option<&'a mut Map<String, Value>> {
    let position = keys.iter().position(|key| object.contains_key(*key))?;
    for key in keys.iter().skip(position + 1) {
        object.remove(*key);
    }
    object.get_mut(keys[position])?.as_object_mut()
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        _ => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn ibge_entry() -> Value {
        json!({
            "id": 3547809,
            "nome": "Santo André",
            "microrregiao": {
                "id": 35061,
                "nome": "São Paulo",
                "mesorregiao": {
                    "id": 3515,
                    "nome": "Metropolitana de São Paulo",
                    "UF": {
                        "id": 35,
                        "sigla": "SP",
                        "nome": "São Paulo",
                        "regiao": { "id": 3, "sigla": "SE", "nome": "Sudeste" }
                    }
                }
            }
        })
    }

    #[test]
    fn decodes_ibge_payload() {
        let record = ReferenceRecord::from_value(ibge_entry()).unwrap();
        assert_eq!(record.id, Some(RecordId::Number(3547809)));
        assert_eq!(record.name, "Santo André");
        assert_eq!(record.subdivision_code(), "SP");
        assert_eq!(record.region_name(), "Sudeste");
    }

    #[test]
    fn decodes_generic_field_names() {
        let value = json!({
            "id": "abc",
            "name": "Curitiba",
            "subdivisionGroup": {
                "subdivisionGroupParent": {
                    "subdivision": { "code": "PR", "region": { "name": "South" } }
                }
            }
        });
        let record = ReferenceRecord::from_value(value).unwrap();
        assert_eq!(record.id, Some(RecordId::Text("abc".to_string())));
        assert_eq!(record.subdivision_code(), "PR");
        assert_eq!(record.region_name(), "South");
    }

    #[test]
    fn missing_levels_yield_empty_values() {
        let value = json!({ "id": 1, "nome": "Lonely", "microrregiao": { "mesorregiao": null } });
        let record = ReferenceRecord::from_value(value).unwrap();
        assert_eq!(record.name, "Lonely");
        assert!(record.subdivision().is_none());
        assert_eq!(record.subdivision_code(), "");
        assert_eq!(record.region_name(), "");
    }

    #[test]
    fn mistyped_levels_yield_empty_values() {
        let value = json!({
            "id": 2,
            "nome": "Broken",
            "microrregiao": { "mesorregiao": { "UF": "SP" } }
        });
        let record = ReferenceRecord::from_value(value).unwrap();
        assert_eq!(record.name, "Broken");
        assert_eq!(record.subdivision_code(), "");
        assert_eq!(record.region_name(), "");
    }

    #[test]
    fn non_string_name_decodes_empty() {
        let record = ReferenceRecord::from_value(json!({ "id": 3, "nome": 42 })).unwrap();
        assert_eq!(record.name, "");
        assert_eq!(record.id_string(), "3");
    }

    #[test]
    fn ibge_keys_win_over_aliases() {
        let value = json!({
            "id": 4,
            "nome": "Niterói",
            "name": "Niteroi (alias)",
            "officialName": "Other",
            "microrregiao": {
                "mesorregiao": {
                    "UF": {
                        "sigla": "RJ",
                        "code": "XX",
                        "regiao": { "nome": "Sudeste", "name": "Southeast" }
                    }
                }
            },
            "subdivisionGroup": null
        });
        let record = ReferenceRecord::from_value(value).unwrap();
        assert_eq!(record.name, "Niterói");
        assert_eq!(record.subdivision_code(), "RJ");
        assert_eq!(record.region_name(), "Sudeste");
    }

    #[test]
    fn first_alias_wins_without_ibge_key() {
        let value = json!({ "id": 5, "name": "Curitiba", "officialName": "Other" });
        let record = ReferenceRecord::from_value(value).unwrap();
        assert_eq!(record.name, "Curitiba");
    }

    #[test]
    fn rejects_non_object_entries() {
        let err = ReferenceRecord::from_value(json!(["not", "an", "entry"])).unwrap_err();
        assert!(matches!(err, ModelError::NotAnObject { kind: "array" }));
    }

    #[test]
    fn serialized_record_decodes_back() {
        let record = ReferenceRecord::new(4106902, "Curitiba").with_location("PR", "Sul");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["microrregiao"]["mesorregiao"]["UF"]["sigla"], "PR");
        assert_eq!(ReferenceRecord::from_value(json).unwrap(), record);
    }
}
