//! core::paths
//!
//! Centralized path routing for the record store.
//!
//! # Storage Layout
//!
//! All records live under the store root:
//! - `<root>/<type-slug>/` - One directory per type, created on first write
//! - `<root>/<type-slug>/<id>.json` - One file per record
//! - `<root>/<type-slug>/<id>.json.tmp` - Transient file during an atomic write
//!
//! No code outside this module should join record paths by hand.
//!
//! # Example
//!
//! ```
//! use minions_skills::core::paths::StorePaths;
//! use minions_skills::core::types::{RecordId, TypeSlug};
//! use std::path::PathBuf;
//!
//! let paths = StorePaths::new("/data/.minions");
//! let slug = TypeSlug::new("skill-result").unwrap();
//! let id = RecordId::new("abc").unwrap();
//!
//! assert_eq!(
//!     paths.record_path(&slug, &id),
//!     PathBuf::from("/data/.minions/skill-result/abc.json")
//! );
//! ```

use std::path::{Path, PathBuf};

use crate::core::types::{RecordId, TypeSlug};

/// Default store root, relative to the working directory.
pub const DEFAULT_STORE_DIR: &str = ".minions";

/// Extension of record files.
pub const RECORD_EXTENSION: &str = "json";

/// Path computation for a store rooted at one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    root: PathBuf,
}

impl StorePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every record of one type.
    pub fn type_dir(&self, slug: &TypeSlug) -> PathBuf {
        self.root.join(slug.as_str())
    }

    /// File holding one record.
    pub fn record_path(&self, slug: &TypeSlug, id: &RecordId) -> PathBuf {
        self.type_dir(slug)
            .join(format!("{}.{}", id.as_str(), RECORD_EXTENSION))
    }

    /// Temporary sibling used while atomically replacing a record file.
    ///
    /// Always in the same directory as `record_path`, so the final rename
    /// never crosses directories.
    pub fn temp_path(record_path: &Path) -> PathBuf {
        record_path.with_extension(format!("{}.tmp", RECORD_EXTENSION))
    }

    /// Check whether a directory entry names a record file.
    pub fn is_record_file(path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == RECORD_EXTENSION)
    }
}

impl Default for StorePaths {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_DIR)
    }
}
