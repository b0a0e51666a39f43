//! update command - Merge fields into an existing record

use anyhow::{Context as _, Result};

use super::{load_payload, parse_id};
use crate::cli::args::PayloadArgs;
use crate::cli::Context;
use crate::core::record::STATUS_FIELD;
use crate::core::types::FieldValue;
use crate::ui::output;

/// Merge fields into a record.
pub fn update(
    ctx: &Context,
    id: &str,
    payload: &PayloadArgs,
    status: Option<&str>,
) -> Result<()> {
    let id = parse_id(id)?;

    let mut updates = load_payload(payload)?;
    if let Some(status) = status {
        updates.insert(STATUS_FIELD.to_string(), FieldValue::from(status));
    }
    if updates.is_empty() {
        output::warn("no fields given; only updatedAt will change", ctx.verbosity);
    }

    let entry = ctx
        .store()
        .update(&id, updates.clone())
        .with_context(|| format!("Failed to update record {}", id))?;

    let v = ctx.verbosity;
    let heading = entry.record.title().unwrap_or(&entry.record.type_name);
    output::success(format!("Updated {}", heading), v);
    for (key, value) in &updates {
        output::print(format!("    • {} → {}", key, value), v);
    }
    Ok(())
}
