//! core
//!
//! Core domain types, schemas, and operations for the record store.
//!
//! # Modules
//!
//! - [`types`] - Strong types: TypeSlug, RecordId, UtcTimestamp, FieldValue
//! - [`registry`] - Catalogue of record types and their field schemas
//! - [`validate`] - Schema conformance checks for field maps
//! - [`payload`] - Parsing of caller-supplied field data
//! - [`record`] - Record schema and storage
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for the store
//!
//! # Design Principles
//!
//! - Identifiers are validated once, at construction
//! - The filesystem is the only source of truth
//! - Validation reports every defect and never fails

pub mod config;
pub mod paths;
pub mod payload;
pub mod record;
pub mod registry;
pub mod types;
pub mod validate;
