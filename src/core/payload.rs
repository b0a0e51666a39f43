//! core::payload
//!
//! Parsing of caller-supplied field data.
//!
//! Field data arrives as inline JSON text or as a path to a JSON file.
//! It must be a JSON object whose values are strings, numbers, booleans
//! or null. Anything else is malformed input and is rejected before any
//! store operation runs, so a bad payload never causes a partial write.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::types::{FieldMap, FieldValue, TypeError};

/// Errors from payload parsing.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("malformed input from {origin}: {message}")]
    Malformed { origin: String, message: String },

    #[error("failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Where a payload comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPayload {
    /// JSON text given directly, e.g. via `--data`.
    Inline(String),
    /// A JSON file, e.g. via `--file`.
    File(PathBuf),
}

impl FieldPayload {
    /// Read and parse the payload into a field map.
    pub fn load(&self) -> Result<FieldMap, PayloadError> {
        match self {
            FieldPayload::Inline(text) => parse_fields(text, "inline data"),
            FieldPayload::File(path) => {
                let text = read_file(path)?;
                parse_fields(&text, &path.display().to_string())
            }
        }
    }
}

/// A document naming its type alongside its fields.
///
/// This is the shape of a stored record file; only `type` and `fields`
/// are read, the remaining record keys are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedDocument {
    pub type_slug: String,
    pub fields: FieldMap,
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(rename = "type")]
    type_slug: Option<String>,
    #[serde(default)]
    fields: Option<Map<String, Value>>,
}

/// Parse JSON text into a field map.
///
/// `origin` names the source in error messages.
pub fn parse_fields(text: &str, origin: &str) -> Result<FieldMap, PayloadError> {
    let value: Value = serde_json::from_str(text).map_err(|e| malformed(origin, e))?;
    match value {
        Value::Object(map) => object_to_fields(map, origin),
        other => Err(PayloadError::Malformed {
            origin: origin.to_string(),
            message: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

/// Read a typed document (e.g. a record file) from disk.
pub fn load_document(path: &Path) -> Result<TypedDocument, PayloadError> {
    let text = read_file(path)?;
    parse_document(&text, &path.display().to_string())
}

/// Parse a typed document from JSON text.
pub fn parse_document(text: &str, origin: &str) -> Result<TypedDocument, PayloadError> {
    let raw: RawDocument = serde_json::from_str(text).map_err(|e| malformed(origin, e))?;
    let type_slug = raw.type_slug.ok_or_else(|| PayloadError::Malformed {
        origin: origin.to_string(),
        message: "missing 'type' key".into(),
    })?;
    let fields = match raw.fields {
        Some(map) => object_to_fields(map, origin)?,
        None => FieldMap::new(),
    };
    Ok(TypedDocument { type_slug, fields })
}

fn object_to_fields(map: Map<String, Value>, origin: &str) -> Result<FieldMap, PayloadError> {
    map.into_iter()
        .map(|(key, value)| {
            let value = FieldValue::from_json(&key, value).map_err(|e| typed(origin, e))?;
            Ok((key, value))
        })
        .collect()
}

fn read_file(path: &Path) -> Result<String, PayloadError> {
    fs::read_to_string(path).map_err(|e| PayloadError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn malformed(origin: &str, e: serde_json::Error) -> PayloadError {
    PayloadError::Malformed {
        origin: origin.to_string(),
        message: e.to_string(),
    }
}

fn typed(origin: &str, e: TypeError) -> PayloadError {
    PayloadError::Malformed {
        origin: origin.to_string(),
        message: e.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
