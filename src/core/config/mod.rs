//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! The store root is resolved in this order (first set wins):
//! 1. `--store` flag
//! 2. `$MINIONS_STORE`
//! 3. `store.root` from the config file
//! 4. `.minions` in the working directory
//!
//! # Config Locations
//!
//! Searched in order, first existing file wins:
//! 1. `$SKILLS_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/minions-skills/config.toml`
//! 3. `~/.minions-skills/config.toml` (canonical write location)
//!
//! A missing config file is not an error; defaults are used.
//!
//! # Example
//!
//! ```no_run
//! use minions_skills::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! let root = config.store_root(None);
//! println!("Store: {}", root.display());
//! println!("JSON by default: {}", config.json_output());
//! ```

pub mod schema;

pub use schema::{ConfigFile, OutputSection, StoreSection};

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::paths::DEFAULT_STORE_DIR;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SKILLS_CONFIG";

/// Environment variable overriding the store root.
pub const STORE_ENV: &str = "MINIONS_STORE";

const APP_DIR: &str = "minions-skills";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown config key '{0}' (known keys: {keys})", keys = Config::KEYS.join(", "))]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: ConfigFile,
    /// Path the file was loaded from, if any
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Keys accepted by [`Config::get`] and [`Config::set`].
    pub const KEYS: &'static [&'static str] = &["store.root", "output.json"];

    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// holds invalid values.
    pub fn load() -> Result<Self, ConfigError> {
        for path in Self::search_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from one file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        debug!(path = %path.display(), "loaded config");
        Ok(Self {
            file,
            loaded_from: Some(path.to_path_buf()),
        })
    }

    /// Candidate config paths in lookup order.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            paths.push(PathBuf::from(path));
        }
        if let Some(xdg_home) = std::env::var_os("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_home).join(APP_DIR).join("config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(format!(".{}", APP_DIR)).join("config.toml"));
        }
        paths
    }

    /// Where `config set` writes.
    ///
    /// `$SKILLS_CONFIG` if set, otherwise `~/.minions-skills/config.toml`.
    pub fn write_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(format!(".{}", APP_DIR)).join("config.toml"))
    }

    /// Write the config file atomically.
    ///
    /// Creates parent directories if needed. The file is written to a temp
    /// sibling and renamed into place.
    pub fn write_atomic(path: &Path, file: &ConfigFile) -> Result<(), ConfigError> {
        file.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(file).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut out = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        out.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        out.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        debug!(path = %path.display(), "wrote config");
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Resolve the store root.
    ///
    /// `flag` is the `--store` value, if given.
    pub fn store_root(&self, flag: Option<&Path>) -> PathBuf {
        self.store_root_with_env(flag, std::env::var_os(STORE_ENV))
    }

    /// Resolve the store root against an explicit `$MINIONS_STORE` value.
    pub fn store_root_with_env(&self, flag: Option<&Path>, env: Option<OsString>) -> PathBuf {
        if let Some(path) = flag {
            return path.to_path_buf();
        }
        if let Some(value) = env.filter(|v| !v.is_empty()) {
            return PathBuf::from(value);
        }
        self.configured_root()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR))
    }

    /// The `store.root` value, if configured.
    pub fn configured_root(&self) -> Option<&str> {
        self.file.store.as_ref().and_then(|s| s.root.as_deref())
    }

    /// Whether JSON output is the default.
    ///
    /// Defaults to `false` if not configured.
    pub fn json_output(&self) -> bool {
        self.file
            .output
            .as_ref()
            .and_then(|o| o.json)
            .unwrap_or(false)
    }

    /// Get the path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }

    /// Get a value by dotted key (`None` if unset).
    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match key {
            "store.root" => Ok(self.configured_root().map(str::to_string)),
            "output.json" => Ok(self
                .file
                .output
                .as_ref()
                .and_then(|o| o.json)
                .map(|b| b.to_string())),
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }

    /// Set a value by dotted key.
    ///
    /// # Errors
    ///
    /// `UnknownKey` for keys outside [`Config::KEYS`], `InvalidValue` if the
    /// value does not parse or fails validation.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "store.root" => {
                let section = StoreSection {
                    root: Some(value.to_string()),
                };
                section.validate()?;
                self.file.store = Some(section);
            }
            "output.json" => {
                let json = value.parse::<bool>().map_err(|_| {
                    ConfigError::InvalidValue(format!(
                        "output.json must be 'true' or 'false', got '{}'",
                        value
                    ))
                })?;
                self.file.output = Some(OutputSection { json: Some(json) });
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}
