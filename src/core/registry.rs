//! core::registry
//!
//! Record type definitions and the immutable registry that holds them.
//!
//! # Architecture
//!
//! The registry is a plain value built once at startup and passed by
//! reference to the store and validator. There is no global catalog;
//! tests construct their own registries with [`TypeRegistry::new`].
//!
//! # Invariants
//!
//! - Slugs are unique across the registry
//! - Field names are unique within a type's schema
//! - Registration order is preserved and is the order of [`TypeRegistry::all`]
//!
//! # Example
//!
//! ```
//! use minions_skills::core::registry::TypeRegistry;
//!
//! let registry = TypeRegistry::builtin();
//! let def = registry.resolve("skill-definition").unwrap();
//! assert_eq!(def.name, "Skill definition");
//! assert_eq!(registry.len(), 3);
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::TypeSlug;

/// Errors from registry construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate type slug: {0}")]
    DuplicateSlug(String),

    #[error("duplicate type id: {0}")]
    DuplicateId(String),

    #[error("duplicate field '{field}' in type '{slug}'")]
    DuplicateField { slug: String, field: String },
}

/// The declared kind of a schema field.
///
/// Only `number` and `boolean` are type-checked by the validator. Any
/// kind the catalog declares beyond the three primitives is kept
/// verbatim in [`FieldKind::Other`] and only checked for presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Other(String),
}

impl FieldKind {
    /// The declared kind name.
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Other(kind) => kind,
        }
    }
}

impl From<String> for FieldKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "string" => FieldKind::String,
            "number" => FieldKind::Number,
            "boolean" => FieldKind::Boolean,
            _ => FieldKind::Other(kind),
        }
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single field declaration in a type schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: String,
}

impl FieldDefinition {
    /// Create a field whose label is its name.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            kind,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }
}

/// A record type: identity, display metadata, and field schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub id: String,
    pub slug: TypeSlug,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub schema: Vec<FieldDefinition>,
}

impl TypeDefinition {
    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.schema.iter().find(|f| f.name == name)
    }

    /// Check whether the schema declares a field.
    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Declared field names in schema order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.schema.iter().map(|f| f.name.as_str())
    }
}

/// Immutable, ordered catalog of record types.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: Vec<TypeDefinition>,
}

impl TypeRegistry {
    /// Build a registry, checking slug, id and field-name uniqueness.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DuplicateSlug`] if two definitions share a slug
    /// - [`RegistryError::DuplicateId`] if two definitions share an id
    /// - [`RegistryError::DuplicateField`] if a schema repeats a field name
    pub fn new(types: Vec<TypeDefinition>) -> Result<Self, RegistryError> {
        let mut slugs = HashSet::new();
        let mut ids = HashSet::new();
        for def in &types {
            if !slugs.insert(def.slug.as_str()) {
                return Err(RegistryError::DuplicateSlug(def.slug.to_string()));
            }
            if !ids.insert(def.id.as_str()) {
                return Err(RegistryError::DuplicateId(def.id.clone()));
            }

            let mut fields = HashSet::new();
            for field in &def.schema {
                if !fields.insert(field.name.as_str()) {
                    return Err(RegistryError::DuplicateField {
                        slug: def.slug.to_string(),
                        field: field.name.clone(),
                    });
                }
            }
        }
        Ok(Self { types })
    }

    /// The built-in skill catalog.
    pub fn builtin() -> Self {
        let types = builtin_types();
        debug_assert!(
            Self::new(types.clone()).is_ok(),
            "built-in catalog fails construction checks"
        );
        Self { types }
    }

    /// Resolve a type by slug.
    ///
    /// Returns `None` if no registered type has this slug.
    pub fn resolve(&self, slug: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|t| t.slug.as_str() == slug)
    }

    /// All types in registration order.
    pub fn all(&self) -> &[TypeDefinition] {
        &self.types
    }

    /// All slugs in registration order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.slug.as_str())
    }

    /// Comma-separated slug list for error messages.
    pub fn available(&self) -> String {
        self.slugs().collect::<Vec<_>>().join(", ")
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn builtin_types() -> Vec<TypeDefinition> {
    vec![
        TypeDefinition {
            id: "skills-skill-definition".into(),
            slug: TypeSlug::from_static("skill-definition"),
            name: "Skill definition".into(),
            description: "A named, versioned skill an agent can load and execute.".into(),
            icon: "🧩".into(),
            schema: vec![
                FieldDefinition::string("name"),
                FieldDefinition::string("description"),
                FieldDefinition::string("version"),
                FieldDefinition::string("inputSchema"),
                FieldDefinition::string("outputSchema"),
                FieldDefinition::string("promptRef"),
                FieldDefinition::string("toolsRequired"),
                FieldDefinition::string("category"),
                FieldDefinition::boolean("isActive"),
            ],
        },
        TypeDefinition {
            id: "skills-skill-assignment".into(),
            slug: TypeSlug::from_static("skill-assignment"),
            name: "Skill assignment".into(),
            description: "A link between an agent definition and a skill it is permitted to use."
                .into(),
            icon: "🔗".into(),
            schema: vec![
                FieldDefinition::string("agentId"),
                FieldDefinition::string("skillId"),
                FieldDefinition::string("assignedAt"),
                FieldDefinition::string("assignedBy"),
                FieldDefinition::boolean("isActive"),
            ],
        },
        TypeDefinition {
            id: "skills-skill-result".into(),
            slug: TypeSlug::from_static("skill-result"),
            name: "Skill result".into(),
            description: "The output of a skill execution within an agent run.".into(),
            icon: "📤".into(),
            schema: vec![
                FieldDefinition::string("skillId"),
                FieldDefinition::string("agentRunId"),
                FieldDefinition::string("inputs"),
                FieldDefinition::string("outputs"),
                FieldDefinition::number("qualityScore"),
                FieldDefinition::string("executedAt"),
                FieldDefinition::boolean("passed"),
                FieldDefinition::string("failureReason"),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(slug_str: &str, fields: Vec<FieldDefinition>) -> TypeDefinition {
        TypeDefinition {
            id: format!("test-{}", slug_str),
            slug: TypeSlug::new(slug_str).unwrap(),
            name: slug_str.to_string(),
            description: String::new(),
            icon: "?".into(),
            schema: fields,
        }
    }

    #[test]
    fn builtin_slugs_are_valid() {
        let registry = TypeRegistry::builtin();
        let slugs: Vec<_> = registry.slugs().collect();
        assert_eq!(
            slugs,
            vec!["skill-definition", "skill-assignment", "skill-result"]
        );
        for s in slugs {
            assert!(TypeSlug::new(s).is_ok(), "{} should be a valid slug", s);
        }
    }

    #[test]
    fn builtin_passes_construction_checks() {
        let registry = TypeRegistry::builtin();
        assert!(TypeRegistry::new(registry.all().to_vec()).is_ok());
    }

    #[test]
    fn resolve_known_type() {
        let registry = TypeRegistry::builtin();
        let result = registry.resolve("skill-result").unwrap();
        assert_eq!(result.name, "Skill result");
        assert_eq!(
            result.field("qualityScore").map(|f| &f.kind),
            Some(&FieldKind::Number)
        );
    }

    #[test]
    fn resolve_unknown_is_none() {
        let registry = TypeRegistry::builtin();
        assert!(registry.resolve("nope").is_none());
        assert_eq!(
            registry.available(),
            "skill-definition, skill-assignment, skill-result"
        );
    }

    #[test]
    fn duplicate_slug_rejected() {
        let result = TypeRegistry::new(vec![def("a", vec![]), def("a", vec![])]);
        assert_eq!(result.unwrap_err(), RegistryError::DuplicateSlug("a".into()));
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut second = def("b", vec![]);
        second.id = "test-a".into();
        let result = TypeRegistry::new(vec![def("a", vec![]), second]);
        assert_eq!(result.unwrap_err(), RegistryError::DuplicateId("test-a".into()));
    }

    #[test]
    fn duplicate_field_rejected() {
        let result = TypeRegistry::new(vec![def(
            "a",
            vec![FieldDefinition::string("x"), FieldDefinition::number("x")],
        )]);
        assert!(matches!(
            result,
            Err(RegistryError::DuplicateField { ref field, .. }) if field == "x"
        ));
    }

    #[test]
    fn registration_order_preserved() {
        let registry = TypeRegistry::new(vec![def("zeta", vec![]), def("alpha", vec![])]).unwrap();
        let slugs: Vec<_> = registry.slugs().collect();
        assert_eq!(slugs, vec!["zeta", "alpha"]);
    }

    #[test]
    fn field_kind_parses_other() {
        let kind = FieldKind::from("select".to_string());
        assert_eq!(kind, FieldKind::Other("select".into()));
        assert_eq!(kind.as_str(), "select");
    }

    #[test]
    fn field_definition_serializes_type_key() {
        let json = serde_json::to_value(FieldDefinition::boolean("isActive")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "isActive", "type": "boolean", "label": "isActive"})
        );
    }
}
