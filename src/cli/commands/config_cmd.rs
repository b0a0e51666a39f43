//! config command - Get, set, or list configuration values

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::config::Config;
use crate::ui::output;

/// Get a configuration value.
///
/// Prints nothing for a known key that is unset.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    if let Some(value) = ctx.config.get(key)? {
        output::line(value);
    }
    Ok(())
}

/// Set a configuration value and write the config file.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let path = Config::write_path()?;

    // Start from what is on disk at the write location, not from whichever
    // file happened to be loaded.
    let mut config = if path.exists() {
        Config::load_from(&path).context("Failed to load config")?
    } else {
        Config::default()
    };

    config.set(key, value)?;
    Config::write_atomic(&path, &config.file).context("Failed to write config")?;

    output::success(format!("Set {} = {}", key, value), ctx.verbosity);
    output::print(format!("  Written to {}", path.display()), ctx.verbosity);
    Ok(())
}

/// List all configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    match ctx.config.loaded_from() {
        Some(path) => output::line(format!("# Loaded from {}", path.display())),
        None => output::line("# No config file found (defaults)"),
    }

    for key in Config::KEYS {
        let value = ctx.config.get(key)?;
        output::line(format!(
            "{} = {}",
            key,
            value.as_deref().unwrap_or("(not set)")
        ));
    }
    output::line(format!(
        "# effective store root: {}",
        ctx.store_root.display()
    ));
    Ok(())
}
