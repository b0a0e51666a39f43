//! list command - List records, optionally filtered by type

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::record::Record;
use crate::ui::output;

/// List records of one type, or of every type.
pub fn list(ctx: &Context, type_slug: Option<&str>, json: bool) -> Result<()> {
    let records = ctx
        .store()
        .list(type_slug)
        .context("Failed to list records")?;

    if ctx.json(json) {
        output::json(&records)?;
        return Ok(());
    }

    let v = ctx.verbosity;
    if records.is_empty() {
        output::print("No records found.", v);
        return Ok(());
    }

    output::print(format!("{} record(s):", records.len()), v);
    output::print("", v);
    for record in &records {
        output::print(format_record_line(ctx, record), v);
    }
    Ok(())
}

fn format_record_line(ctx: &Context, record: &Record) -> String {
    let icon = ctx
        .registry
        .resolve(record.type_slug.as_str())
        .map_or("?", |def| def.icon.as_str());
    let title = record.title().unwrap_or("(untitled)");
    let status = record
        .status()
        .map(|s| format!(" [{}]", s))
        .unwrap_or_default();
    format!(
        "  {}  {}{}\n     {} {}",
        icon, title, status, record.id, record.type_slug
    )
}
