//! show command - Show a record by id

use anyhow::Result;

use super::parse_id;
use crate::cli::Context;
use crate::ui::output;

/// Show a record.
pub fn show(ctx: &Context, id: &str, json: bool) -> Result<()> {
    let id = parse_id(id)?;
    let entry = ctx.store().get(&id)?;
    let record = &entry.record;

    if ctx.json(json) {
        output::json(record)?;
        return Ok(());
    }

    let v = ctx.verbosity;
    let def = ctx.registry.resolve(record.type_slug.as_str());
    let icon = def.map_or("?", |d| d.icon.as_str());
    let heading = record.title().unwrap_or(&record.type_name);

    output::print(format!("{}  {}", icon, heading), v);
    output::print(
        format!("  Type: {}  ID: {}", record.type_slug, record.id),
        v,
    );
    output::print(format!("  Created: {}", record.created_at), v);
    output::print(format!("  Updated: {}", record.updated_at), v);
    output::print(format!("  File: {}", entry.path.display()), v);
    output::print("", v);

    if record.fields.is_empty() {
        output::print("  No fields.", v);
        return Ok(());
    }
    output::print("  Fields:", v);
    for (key, value) in &record.fields {
        output::print(format!("    • {}: {}", key, value), v);
    }
    Ok(())
}
