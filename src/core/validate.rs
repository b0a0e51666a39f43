//! core::validate
//!
//! Schema conformance checks for field maps.
//!
//! # Semantics
//!
//! Validation is total: every defect is reported in one pass, in this order:
//!
//! 1. Declared fields missing from the map (schema order)
//! 2. Keys in the map the schema does not declare (key order)
//! 3. Declared `number`/`boolean` fields whose value has another kind
//!    (schema order)
//!
//! `string` fields and any other declared kind are only checked for
//! presence. Validation never mutates its inputs and never fails; an
//! empty list means the map conforms.
//!
//! The store does not call this on create or update. Callers that want
//! the guarantee validate explicitly.
//!
//! # Example
//!
//! ```
//! use minions_skills::core::registry::TypeRegistry;
//! use minions_skills::core::types::FieldMap;
//! use minions_skills::core::validate::{validate, ValidationError};
//!
//! let registry = TypeRegistry::builtin();
//! let def = registry.resolve("skill-assignment").unwrap();
//!
//! let errors = validate(def, &FieldMap::new());
//! assert_eq!(errors.len(), 5);
//! assert_eq!(
//!     errors[0],
//!     ValidationError::MissingField { field: "agentId".into() }
//! );
//! ```

use serde::Serialize;
use thiserror::Error;

use crate::core::registry::{FieldKind, TypeDefinition};
use crate::core::types::{FieldMap, FieldValue};

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Missing field: {field}")]
    MissingField { field: String },

    #[error("Unknown field: {field}")]
    UnknownField { field: String },

    #[error("Field {field} should be {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },
}

impl ValidationError {
    /// The field this finding is about.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::UnknownField { field }
            | ValidationError::TypeMismatch { field, .. } => field,
        }
    }
}

/// Validate a field map against a type's schema.
pub fn validate(def: &TypeDefinition, fields: &FieldMap) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for name in def.field_names() {
        if !fields.contains_key(name) {
            errors.push(ValidationError::MissingField {
                field: name.to_string(),
            });
        }
    }

    for key in fields.keys() {
        if !def.declares(key) {
            errors.push(ValidationError::UnknownField { field: key.clone() });
        }
    }

    for field in &def.schema {
        let Some(value) = fields.get(&field.name) else {
            continue;
        };
        if !kind_matches(&field.kind, value) {
            errors.push(ValidationError::TypeMismatch {
                field: field.name.clone(),
                expected: field.kind.to_string(),
                actual: value.kind_name().to_string(),
            });
        }
    }

    errors
}

fn kind_matches(kind: &FieldKind, value: &FieldValue) -> bool {
    match kind {
        FieldKind::Number => matches!(value, FieldValue::Number(_)),
        FieldKind::Boolean => matches!(value, FieldValue::Boolean(_)),
        FieldKind::String | FieldKind::Other(_) => true,
    }
}
