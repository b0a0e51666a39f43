//! core::record::store
//!
//! Record storage on a directory-per-type layout.
//!
//! # Architecture
//!
//! Each record is one JSON file at `<root>/<type-slug>/<id>.json`. The
//! filesystem is the only source of truth: every operation reads what it
//! needs from disk and nothing is cached between calls.
//!
//! Writes replace a whole file atomically (write a temp sibling, fsync,
//! rename), so a reader never sees a partially written record.
//!
//! # Concurrency
//!
//! There is no locking. Two processes updating the same record race and
//! the last writer wins. Running at most one writer at a time is the
//! caller's responsibility.
//!
//! # Lookup by id
//!
//! Ids are assumed to be globally unique. A lookup searches each type
//! directory in registry order and returns the first match; nothing
//! prevents the same id from existing under two types.
//!
//! # Example
//!
//! ```no_run
//! use minions_skills::core::record::store::RecordStore;
//! use minions_skills::core::registry::TypeRegistry;
//! use minions_skills::core::types::FieldMap;
//!
//! let registry = TypeRegistry::builtin();
//! let store = RecordStore::new(&registry, ".minions");
//!
//! let created = store.create("skill-definition", FieldMap::new())?;
//! let entry = store.get(&created.record.id)?;
//! assert_eq!(entry.record, created.record);
//! # Ok::<(), minions_skills::core::record::store::StoreError>(())
//! ```

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::schema::{parse_record, Record, RecordError};
use crate::core::paths::StorePaths;
use crate::core::payload::TypedDocument;
use crate::core::registry::{TypeDefinition, TypeRegistry};
use crate::core::types::{FieldMap, RecordId, TypeSlug};
use crate::core::validate::{validate, ValidationError};

/// Errors from record storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The slug does not name a registered type.
    #[error("unknown type: {slug} (available types: {available})")]
    UnknownType { slug: String, available: String },

    /// No type directory holds a record with this id.
    #[error("record not found: {0}")]
    NotFound(String),

    /// A record file exists but cannot be parsed.
    #[error("corrupt record file '{path}': {message}")]
    Corrupt { path: PathBuf, message: String },

    /// Failed to serialize a record.
    #[error("failed to serialize record: {0}")]
    SerializeError(String),

    /// A filesystem operation failed.
    #[error("storage failure at '{path}': {source}")]
    StorageFailure { path: PathBuf, source: io::Error },
}

impl StoreError {
    fn storage(path: &Path, source: io::Error) -> Self {
        StoreError::StorageFailure {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A record together with the file it was read from or written to.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordEntry {
    pub path: PathBuf,
    pub record: Record,
}

/// Result of a delete.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// Soft delete: the record was kept with `status = "cancelled"`.
    Cancelled(RecordEntry),
    /// Hard delete: the file was removed.
    Removed { id: RecordId, path: PathBuf },
}

/// Record count for one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub slug: TypeSlug,
    pub name: String,
    pub count: usize,
}

/// Per-type record counts in registry order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub types: Vec<TypeCount>,
    pub total: usize,
}

impl StoreStats {
    /// Count for one slug (0 if the slug is not in the stats).
    pub fn count(&self, slug: &str) -> usize {
        self.types
            .iter()
            .find(|t| t.slug.as_str() == slug)
            .map_or(0, |t| t.count)
    }

    /// Slug to count mapping.
    pub fn counts(&self) -> BTreeMap<String, usize> {
        self.types
            .iter()
            .map(|t| (t.slug.to_string(), t.count))
            .collect()
    }
}

/// Record store rooted at one directory.
pub struct RecordStore<'a> {
    registry: &'a TypeRegistry,
    paths: StorePaths,
}

impl<'a> RecordStore<'a> {
    /// Create a store over `root` for the types in `registry`.
    ///
    /// Nothing is touched on disk until the first write.
    pub fn new(registry: &'a TypeRegistry, root: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            paths: StorePaths::new(root),
        }
    }

    /// The store root.
    pub fn root(&self) -> &Path {
        self.paths.root()
    }

    /// Resolve a slug against the registry.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownType`] if the slug is not registered.
    pub fn resolve(&self, slug: &str) -> Result<&'a TypeDefinition, StoreError> {
        self.registry
            .resolve(slug)
            .ok_or_else(|| StoreError::UnknownType {
                slug: slug.to_string(),
                available: self.registry.available(),
            })
    }

    /// Create a record of the given type.
    ///
    /// The fields are written as given. They are not validated against
    /// the schema; use [`RecordStore::validate`] for that.
    ///
    /// # Errors
    ///
    /// - [`StoreError::UnknownType`] if the slug is not registered
    /// - [`StoreError::StorageFailure`] if the file cannot be written
    pub fn create(&self, slug: &str, fields: FieldMap) -> Result<RecordEntry, StoreError> {
        let def = self.resolve(slug)?;
        let record = Record::new(def, fields);
        let path = self.write_record(&record)?;
        debug!(slug = %record.type_slug, id = %record.id, path = %path.display(), "created record");
        Ok(RecordEntry { path, record })
    }

    /// Find a record by id, returning `None` if no type directory has it.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Corrupt`] if the matching file cannot be parsed
    /// - [`StoreError::StorageFailure`] for I/O errors other than a missing file
    pub fn find(&self, id: &RecordId) -> Result<Option<RecordEntry>, StoreError> {
        for def in self.registry.all() {
            let path = self.paths.record_path(&def.slug, id);
            match fs::read_to_string(&path) {
                Ok(contents) => {
                    debug!(slug = %def.slug, id = %id, "found record");
                    let record = parse_at(&path, &contents)?;
                    return Ok(Some(RecordEntry { path, record }));
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(StoreError::storage(&path, e)),
            }
        }
        Ok(None)
    }

    /// Get a record by id.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if no type directory has the id, plus the
    /// errors of [`RecordStore::find`].
    pub fn get(&self, id: &RecordId) -> Result<RecordEntry, StoreError> {
        self.find(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// List records of one type, or of every type when `slug` is `None`.
    ///
    /// Types are visited in registry order. Within a type directory,
    /// records are ordered by file name, i.e. by id, not by creation
    /// time. A type whose directory does not exist yet contributes no
    /// records.
    ///
    /// # Errors
    ///
    /// - [`StoreError::UnknownType`] if `slug` is given and not registered
    /// - [`StoreError::Corrupt`] if any record file cannot be parsed
    pub fn list(&self, slug: Option<&str>) -> Result<Vec<Record>, StoreError> {
        let defs: Vec<&TypeDefinition> = match slug {
            Some(s) => vec![self.resolve(s)?],
            None => self.registry.all().iter().collect(),
        };

        let mut records = Vec::new();
        for def in defs {
            for path in self.record_files(&def.slug)? {
                let contents =
                    fs::read_to_string(&path).map_err(|e| StoreError::storage(&path, e))?;
                records.push(parse_at(&path, &contents)?);
            }
        }
        Ok(records)
    }

    /// Merge `updates` into a record's fields.
    ///
    /// Keys in `updates` overwrite existing values; other fields are kept.
    /// `updatedAt` is refreshed; id, type, typeName and createdAt never
    /// change.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the id does not exist.
    pub fn update(&self, id: &RecordId, updates: FieldMap) -> Result<RecordEntry, StoreError> {
        let RecordEntry { path, mut record } = self.get(id)?;
        record.merge(updates);
        self.replace(&path, &record)?;
        debug!(slug = %record.type_slug, id = %record.id, "updated record");
        Ok(RecordEntry { path, record })
    }

    /// Delete a record.
    ///
    /// A soft delete (`hard = false`) sets `fields.status = "cancelled"`
    /// whether or not the type's schema declares a `status` field. A hard
    /// delete removes the file.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the id does not exist.
    pub fn delete(&self, id: &RecordId, hard: bool) -> Result<DeleteOutcome, StoreError> {
        let RecordEntry { path, mut record } = self.get(id)?;

        if hard {
            fs::remove_file(&path).map_err(|e| StoreError::storage(&path, e))?;
            debug!(id = %id, path = %path.display(), "removed record");
            return Ok(DeleteOutcome::Removed {
                id: id.clone(),
                path,
            });
        }

        record.cancel();
        self.replace(&path, &record)?;
        debug!(id = %id, "cancelled record");
        Ok(DeleteOutcome::Cancelled(RecordEntry { path, record }))
    }

    /// Count record files per type.
    pub fn stats(&self) -> Result<StoreStats, StoreError> {
        let mut types = Vec::with_capacity(self.registry.len());
        for def in self.registry.all() {
            types.push(TypeCount {
                slug: def.slug.clone(),
                name: def.name.clone(),
                count: self.record_files(&def.slug)?.len(),
            });
        }
        let total = types.iter().map(|t| t.count).sum();
        Ok(StoreStats { types, total })
    }

    /// Validate a field map against the schema of the named type.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownType`] if the slug is not registered. Schema
    /// violations are returned as data, not as an error.
    pub fn validate(
        &self,
        slug: &str,
        fields: &FieldMap,
    ) -> Result<Vec<ValidationError>, StoreError> {
        let def = self.resolve(slug)?;
        Ok(validate(def, fields))
    }

    /// Validate a document that names its own type.
    pub fn validate_document(
        &self,
        doc: &TypedDocument,
    ) -> Result<Vec<ValidationError>, StoreError> {
        self.validate(&doc.type_slug, &doc.fields)
    }

    fn write_record(&self, record: &Record) -> Result<PathBuf, StoreError> {
        let dir = self.paths.type_dir(&record.type_slug);
        fs::create_dir_all(&dir).map_err(|e| StoreError::storage(&dir, e))?;

        let path = self.paths.record_path(&record.type_slug, &record.id);
        self.replace(&path, record)?;
        Ok(path)
    }

    /// Atomically replace the file at `path` with `record`.
    ///
    /// The temp file sits next to `path`. It is removed if any step fails.
    fn replace(&self, path: &Path, record: &Record) -> Result<(), StoreError> {
        let contents = record
            .to_pretty_json()
            .map_err(|e| StoreError::SerializeError(e.to_string()))?;

        let temp_path = StorePaths::temp_path(path);
        let result = write_synced(&temp_path, contents.as_bytes()).and_then(|()| {
            fs::rename(&temp_path, path).map_err(|e| StoreError::storage(path, e))
        });

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }

    /// Record files in a type directory, sorted by file name.
    ///
    /// A missing directory yields an empty list.
    fn record_files(&self, slug: &TypeSlug) -> Result<Vec<PathBuf>, StoreError> {
        let dir = self.paths.type_dir(slug);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::storage(&dir, e)),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::storage(&dir, e))?;
            let path = entry.path();
            let is_file = entry
                .file_type()
                .map_err(|e| StoreError::storage(&path, e))?
                .is_file();
            if is_file && StorePaths::is_record_file(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

fn write_synced(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| StoreError::storage(path, e))?;

    file.write_all(contents)
        .map_err(|e| StoreError::storage(path, e))?;

    file.sync_all().map_err(|e| StoreError::storage(path, e))
}

fn parse_at(path: &Path, contents: &str) -> Result<Record, StoreError> {
    parse_record(contents).map_err(|e| StoreError::Corrupt {
        path: path.to_path_buf(),
        message: match e {
            RecordError::ParseError(m) | RecordError::SerializeError(m) => m,
        },
    })
}
