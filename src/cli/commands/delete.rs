//! delete command - Soft or hard delete a record

use anyhow::{Context as _, Result};

use super::parse_id;
use crate::cli::Context;
use crate::core::record::DeleteOutcome;
use crate::ui::output;

/// Delete a record.
pub fn delete(ctx: &Context, id: &str, hard: bool) -> Result<()> {
    let id = parse_id(id)?;
    let outcome = ctx
        .store()
        .delete(&id, hard)
        .with_context(|| format!("Failed to delete record {}", id))?;

    let v = ctx.verbosity;
    match outcome {
        DeleteOutcome::Removed { id, .. } => {
            output::success(format!("Permanently deleted {}", id), v);
        }
        DeleteOutcome::Cancelled(entry) => {
            let heading = entry.record.title().unwrap_or(&entry.record.type_name);
            output::success(format!("Cancelled {}", heading), v);
            output::print("  Use --hard to permanently delete", v);
        }
    }
    Ok(())
}
