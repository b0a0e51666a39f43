//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`TypeSlug`] - Path-safe record type identifier
//! - [`RecordId`] - Record identifier (file stem under a type directory)
//! - [`UtcTimestamp`] - RFC3339 timestamp
//! - [`FieldValue`] - Primitive field value (string, number, boolean, null)
//! - [`FieldMap`] - Field name to value mapping
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so a slug or id can always be joined onto a
//! store path without escaping the store root.
//!
//! # Examples
//!
//! ```
//! use minions_skills::core::types::{RecordId, TypeSlug};
//!
//! let slug = TypeSlug::new("skill-definition").unwrap();
//! let id = RecordId::generate();
//! assert_eq!(slug.as_str(), "skill-definition");
//! assert_eq!(id.as_str().len(), 36);
//!
//! assert!(TypeSlug::new("Skill Definition").is_err());
//! assert!(RecordId::new("../escape").is_err());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid type slug: {0}")]
    InvalidSlug(String),

    #[error("invalid record id: {0}")]
    InvalidRecordId(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("unsupported value for field '{field}': {kind} (expected string, number, boolean or null)")]
    UnsupportedValue { field: String, kind: &'static str },
}

/// A validated record type slug.
///
/// Slugs double as directory names, so they are restricted to
/// lowercase ASCII letters, digits and `-`, and may not start or end
/// with `-`.
///
/// # Example
///
/// ```
/// use minions_skills::core::types::TypeSlug;
///
/// assert!(TypeSlug::new("skill-result").is_ok());
/// assert!(TypeSlug::new("").is_err());
/// assert!(TypeSlug::new("-leading").is_err());
/// assert!(TypeSlug::new("with/slash").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeSlug(String);

impl TypeSlug {
    /// Create a new validated slug.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidSlug` if the slug is not path-safe.
    pub fn new(slug: impl Into<String>) -> Result<Self, TypeError> {
        let slug = slug.into();
        Self::validate(&slug)?;
        Ok(Self(slug))
    }

    fn validate(slug: &str) -> Result<(), TypeError> {
        if slug.is_empty() {
            return Err(TypeError::InvalidSlug("slug cannot be empty".into()));
        }
        if slug.starts_with('-') || slug.ends_with('-') {
            return Err(TypeError::InvalidSlug(format!(
                "'{}' cannot start or end with '-'",
                slug
            )));
        }
        if let Some(c) = slug
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(TypeError::InvalidSlug(format!(
                "'{}' contains invalid character '{}'",
                slug, c
            )));
        }
        Ok(())
    }

    /// Wrap a compile-time slug literal.
    ///
    /// Only for the built-in catalog; the literals are covered by tests.
    pub(crate) fn from_static(slug: &'static str) -> Self {
        debug_assert!(Self::validate(slug).is_ok(), "invalid built-in slug {}", slug);
        Self(slug.to_string())
    }

    /// Get the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TypeSlug {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TypeSlug> for String {
    fn from(slug: TypeSlug) -> Self {
        slug.0
    }
}

impl fmt::Display for TypeSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TypeSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A record identifier.
///
/// Freshly created records get a random UUID v4. Ids read back from disk
/// or supplied by a caller are accepted as long as they are usable as a
/// file stem: non-empty, no path separators, not `.` or `..`.
///
/// Ids are assumed to be unique across all types. Nothing checks this at
/// creation time; lookups return the first type directory that holds a
/// matching file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Create a record id from an existing string.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRecordId` if the id cannot be used as a
    /// file stem.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    fn validate(id: &str) -> Result<(), TypeError> {
        if id.is_empty() {
            return Err(TypeError::InvalidRecordId("id cannot be empty".into()));
        }
        if id == "." || id == ".." {
            return Err(TypeError::InvalidRecordId(format!("'{}' is reserved", id)));
        }
        if id.contains(['/', '\\']) {
            return Err(TypeError::InvalidRecordId(format!(
                "'{}' cannot contain path separators",
                id
            )));
        }
        if id.chars().any(|c| c.is_ascii_control()) {
            return Err(TypeError::InvalidRecordId(
                "id cannot contain control characters".into(),
            ));
        }
        Ok(())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RecordId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A UTC timestamp, serialized as RFC3339 with millisecond precision.
///
/// # Example
///
/// ```
/// use minions_skills::core::types::UtcTimestamp;
///
/// let ts = UtcTimestamp::parse("2026-01-02T03:04:05.678Z").unwrap();
/// assert_eq!(ts.to_string(), "2026-01-02T03:04:05.678Z");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UtcTimestamp(DateTime<Utc>);

impl UtcTimestamp {
    /// Create a timestamp for the current moment.
    ///
    /// Truncated to milliseconds so the value survives a serde round-trip.
    pub fn now() -> Self {
        Self(Utc::now().trunc_subsecs(3))
    }

    /// Parse any RFC3339 timestamp, normalizing to UTC.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| TypeError::InvalidTimestamp(format!("'{}': {}", s, e)))
    }
}

impl fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl TryFrom<String> for UtcTimestamp {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<UtcTimestamp> for String {
    fn from(ts: UtcTimestamp) -> Self {
        ts.to_string()
    }
}

/// A single field value.
///
/// Only the primitive JSON kinds are representable. Numbers keep their
/// JSON form, so an integer written as `3` reads back as `3`, not `3.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum FieldValue {
    String(String),
    Number(Number),
    Boolean(bool),
    Null,
}

impl FieldValue {
    /// Name of this value's kind as reported in validation messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Number(_) => "number",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Null => "null",
        }
    }

    /// Get the value as a string slice, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert a JSON value for the named field.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::UnsupportedValue` for arrays and objects.
    pub fn from_json(field: &str, value: Value) -> Result<Self, TypeError> {
        match value {
            Value::String(s) => Ok(FieldValue::String(s)),
            Value::Number(n) => Ok(FieldValue::Number(n)),
            Value::Bool(b) => Ok(FieldValue::Boolean(b)),
            Value::Null => Ok(FieldValue::Null),
            Value::Array(_) => Err(TypeError::UnsupportedValue {
                field: field.to_string(),
                kind: "array",
            }),
            Value::Object(_) => Err(TypeError::UnsupportedValue {
                field: field.to_string(),
                kind: "object",
            }),
        }
    }
}

impl TryFrom<Value> for FieldValue {
    type Error = TypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json("<value>", value)
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::String(s) => Value::String(s),
            FieldValue::Number(n) => Value::Number(n),
            FieldValue::Boolean(b) => Value::Bool(b),
            FieldValue::Null => Value::Null,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n.into())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

/// Field name to value mapping, ordered by field name.
pub type FieldMap = BTreeMap<String, FieldValue>;
