//! core::record::schema
//!
//! The persisted record document.
//!
//! # Format
//!
//! A record file is a JSON object with these keys, in this order:
//!
//! ```json
//! {
//!   "id": "0b6e5c1e-7d0a-4c1e-9a55-3f2f8f1f6c1d",
//!   "type": "skill-definition",
//!   "typeName": "Skill definition",
//!   "fields": { "name": "summarize", "isActive": true },
//!   "createdAt": "2026-01-01T12:00:00.000Z",
//!   "updatedAt": "2026-01-01T12:00:00.000Z"
//! }
//! ```
//!
//! Files are written with 2-space indentation and a trailing newline.
//! Extra top-level keys in a hand-edited file are ignored on read.
//!
//! # Example
//!
//! ```
//! use minions_skills::core::record::schema::{parse_record, Record};
//! use minions_skills::core::registry::TypeRegistry;
//! use minions_skills::core::types::FieldMap;
//!
//! let registry = TypeRegistry::builtin();
//! let def = registry.resolve("skill-definition").unwrap();
//!
//! let record = Record::new(def, FieldMap::new());
//! let json = record.to_pretty_json().unwrap();
//! assert_eq!(parse_record(&json).unwrap(), record);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::registry::TypeDefinition;
use crate::core::types::{FieldMap, FieldValue, RecordId, TypeSlug, UtcTimestamp};

/// Field written by a soft delete.
pub const STATUS_FIELD: &str = "status";

/// Status value marking a soft-deleted record.
pub const CANCELLED_STATUS: &str = "cancelled";

/// Errors from record parsing and serialization.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to parse record: {0}")]
    ParseError(String),

    #[error("failed to serialize record: {0}")]
    SerializeError(String),
}

/// A stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub type_slug: TypeSlug,
    /// Display name of the type when the record was created.
    pub type_name: String,
    #[serde(default)]
    pub fields: FieldMap,
    pub created_at: UtcTimestamp,
    pub updated_at: UtcTimestamp,
}

impl Record {
    /// Create a record of the given type with a fresh id.
    ///
    /// Both timestamps are set to the current moment. The fields are
    /// taken as-is; nothing is checked against the schema.
    pub fn new(def: &TypeDefinition, fields: FieldMap) -> Self {
        let now = UtcTimestamp::now();
        Self {
            id: RecordId::generate(),
            type_slug: def.slug.clone(),
            type_name: def.name.clone(),
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    /// Shallow-merge `updates` into the fields and refresh `updated_at`.
    ///
    /// Keys in `updates` overwrite, keys absent from it are kept.
    pub fn merge(&mut self, updates: FieldMap) {
        self.fields.extend(updates);
        self.touch();
    }

    /// Mark the record cancelled (soft delete).
    pub fn cancel(&mut self) {
        self.fields.insert(
            STATUS_FIELD.to_string(),
            FieldValue::from(CANCELLED_STATUS),
        );
        self.touch();
    }

    /// Refresh `updated_at`.
    ///
    /// Never moves backwards, even if the wall clock does.
    pub fn touch(&mut self) {
        self.updated_at = UtcTimestamp::now().max(self.created_at);
    }

    /// The status field, if set to a string.
    pub fn status(&self) -> Option<&str> {
        self.fields.get(STATUS_FIELD).and_then(FieldValue::as_str)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status() == Some(CANCELLED_STATUS)
    }

    /// Human-facing title: the first of `title`, `name`, `label` that is
    /// a non-empty string.
    pub fn title(&self) -> Option<&str> {
        ["title", "name", "label"]
            .iter()
            .filter_map(|key| self.fields.get(*key).and_then(FieldValue::as_str))
            .find(|s| !s.is_empty())
    }

    /// Serialize to the on-disk format.
    pub fn to_pretty_json(&self) -> Result<String, RecordError> {
        let mut json = serde_json::to_string_pretty(self)
            .map_err(|e| RecordError::SerializeError(e.to_string()))?;
        json.push('\n');
        Ok(json)
    }
}

/// Parse a record file's contents.
pub fn parse_record(json: &str) -> Result<Record, RecordError> {
    serde_json::from_str(json).map_err(|e| RecordError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::TypeRegistry;

    fn definition_type() -> TypeDefinition {
        TypeRegistry::builtin()
            .resolve("skill-definition")
            .unwrap()
            .clone()
    }

    fn sample() -> Record {
        let mut fields = FieldMap::new();
        fields.insert("name".into(), "summarize".into());
        fields.insert("isActive".into(), true.into());
        Record::new(&definition_type(), fields)
    }

    #[test]
    fn new_snapshots_type_metadata() {
        let record = sample();
        assert_eq!(record.type_slug.as_str(), "skill-definition");
        assert_eq!(record.type_name, "Skill definition");
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn serializes_expected_keys_in_order() {
        let json = sample().to_pretty_json().unwrap();
        let keys: Vec<usize> = [
            "\"id\"",
            "\"type\"",
            "\"typeName\"",
            "\"fields\"",
            "\"createdAt\"",
            "\"updatedAt\"",
        ]
        .iter()
        .map(|k| json.find(k).expect("key present"))
        .collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        assert!(json.starts_with("{\n  \"id\""));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn parse_round_trip() {
        let record = sample();
        let parsed = parse_record(&record.to_pretty_json().unwrap()).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn parse_accepts_foreign_timestamp_format() {
        let json = r#"{
            "id": "r1",
            "type": "skill-definition",
            "typeName": "Skill definition",
            "fields": {},
            "createdAt": "2026-02-03T04:05:06.789Z",
            "updatedAt": "2026-02-03T04:05:06Z"
        }"#;
        let record = parse_record(json).unwrap();
        assert_eq!(record.id.as_str(), "r1");
        assert_eq!(record.updated_at.to_string(), "2026-02-03T04:05:06.000Z");
    }

    #[test]
    fn parse_rejects_nested_field_values() {
        let json = r#"{
            "id": "r1",
            "type": "skill-definition",
            "typeName": "Skill definition",
            "fields": {"tags": ["a"]},
            "createdAt": "2026-02-03T04:05:06Z",
            "updatedAt": "2026-02-03T04:05:06Z"
        }"#;
        assert!(matches!(parse_record(json), Err(RecordError::ParseError(_))));
    }

    #[test]
    fn merge_overwrites_and_preserves() {
        let mut record = sample();
        let mut updates = FieldMap::new();
        updates.insert("name".into(), "translate".into());
        updates.insert("category".into(), "nlp".into());
        record.merge(updates);

        assert_eq!(record.fields["name"], FieldValue::from("translate"));
        assert_eq!(record.fields["category"], FieldValue::from("nlp"));
        assert_eq!(record.fields["isActive"], FieldValue::Boolean(true));
        assert!(record.updated_at >= record.created_at);
    }

    #[test]
    fn cancel_sets_status() {
        let mut record = sample();
        assert!(!record.is_cancelled());
        record.cancel();
        assert!(record.is_cancelled());
        assert_eq!(record.status(), Some("cancelled"));
    }

    #[test]
    fn title_prefers_title_then_name() {
        let mut record = sample();
        assert_eq!(record.title(), Some("summarize"));

        record.fields.insert("title".into(), "Summarizer".into());
        assert_eq!(record.title(), Some("Summarizer"));

        record.fields.clear();
        assert_eq!(record.title(), None);
    }
}
