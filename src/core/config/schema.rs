//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Location
//!
//! Searched in order:
//! 1. `$SKILLS_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/minions-skills/config.toml`
//! 3. `~/.minions-skills/config.toml` (canonical write location)
//!
//! # Validation
//!
//! Values are validated after parsing (e.g., the store root must not be
//! empty). Unknown keys are rejected at every level.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Contents of a config file.
///
/// # Example
///
/// ```toml
/// [store]
/// root = "/var/lib/minions"
///
/// [output]
/// json = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Store settings
    pub store: Option<StoreSection>,

    /// Output defaults
    pub output: Option<OutputSection>,
}

impl ConfigFile {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(store) = &self.store {
            store.validate()?;
        }
        Ok(())
    }
}

/// `[store]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    /// Store root directory. Relative paths resolve against the working
    /// directory.
    pub root: Option<String>,
}

impl StoreSection {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(root) = &self.root {
            if root.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "store.root cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// `[output]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    /// Emit JSON by default from commands that support `--json`
    pub json: Option<bool>,
}
