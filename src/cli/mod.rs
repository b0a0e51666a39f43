//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and resolve the store root
//! - Install the log subscriber
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers parse payloads, call
//! [`crate::core::record::RecordStore`], and format the result. They never
//! touch record files directly.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::core::config::Config;
use crate::core::record::RecordStore;
use crate::core::registry::TypeRegistry;
use crate::ui::output::Verbosity;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "SKILLS_LOG";

/// Everything a command handler needs.
#[derive(Debug)]
pub struct Context {
    /// Resolved store root.
    pub store_root: PathBuf,
    /// Output verbosity from `--quiet` / `--debug`.
    pub verbosity: Verbosity,
    /// Loaded configuration.
    pub config: Config,
    /// Registered record types.
    pub registry: TypeRegistry,
}

impl Context {
    /// A store over the resolved root.
    pub fn store(&self) -> RecordStore<'_> {
        RecordStore::new(&self.registry, &self.store_root)
    }

    /// Whether to emit JSON, given the command's `--json` flag.
    pub fn json(&self, flag: bool) -> bool {
        flag || self.config.json_output()
    }

    pub fn quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    let config = Config::load().context("Failed to load config")?;
    let store_root = config.store_root(cli.store.as_deref());
    debug!(root = %store_root.display(), "resolved store root");

    let ctx = Context {
        store_root,
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
        config,
        registry: TypeRegistry::builtin(),
    };

    commands::dispatch(cli.command, &ctx)
}

/// Install the stderr log subscriber.
///
/// `$SKILLS_LOG` wins when set; otherwise the level is `warn`, or `debug`
/// with `--debug`.
fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (e.g. in tests) is not an error worth reporting.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
