//! core::record
//!
//! Record schema and storage.
//!
//! # Modules
//!
//! - [`schema`] - The persisted record document
//! - [`store`] - Record storage on the filesystem
//!
//! # Architecture
//!
//! Records are stored as JSON files under `<root>/<type-slug>/<id>.json`.
//! A record snapshots its type's slug and display name when it is created
//! and never changes type afterwards.
//!
//! # Example
//!
//! ```
//! use minions_skills::core::record::{parse_record, Record};
//! use minions_skills::core::registry::TypeRegistry;
//! use minions_skills::core::types::FieldMap;
//!
//! let registry = TypeRegistry::builtin();
//! let def = registry.resolve("skill-result").unwrap();
//!
//! let mut record = Record::new(def, FieldMap::new());
//! record.cancel();
//! let parsed = parse_record(&record.to_pretty_json().unwrap()).unwrap();
//! assert!(parsed.is_cancelled());
//! ```

pub mod schema;
pub mod store;

pub use schema::{parse_record, Record, RecordError, CANCELLED_STATUS, STATUS_FIELD};
pub use store::{DeleteOutcome, RecordEntry, RecordStore, StoreError, StoreStats, TypeCount};
