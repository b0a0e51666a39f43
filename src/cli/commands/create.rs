//! create command - Create a record of a registered type

use anyhow::{Context as _, Result};

use super::load_payload;
use crate::cli::args::PayloadArgs;
use crate::cli::Context;
use crate::core::record::STATUS_FIELD;
use crate::core::types::FieldValue;
use crate::ui::output;

/// Create a record.
///
/// `title` goes to the `title` field when the type declares one and to
/// `name` otherwise; `status` goes to `status`. Both override the payload.
pub fn create(
    ctx: &Context,
    type_slug: &str,
    payload: &PayloadArgs,
    title: Option<&str>,
    status: Option<&str>,
) -> Result<()> {
    let store = ctx.store();
    let def = store.resolve(type_slug)?;

    let mut fields = load_payload(payload)?;
    if let Some(title) = title {
        let key = if def.declares("title") { "title" } else { "name" };
        fields.insert(key.to_string(), FieldValue::from(title));
    }
    if let Some(status) = status {
        fields.insert(STATUS_FIELD.to_string(), FieldValue::from(status));
    }

    let entry = store
        .create(type_slug, fields)
        .with_context(|| format!("Failed to create {} record", type_slug))?;

    let v = ctx.verbosity;
    if ctx.quiet() {
        output::line(&entry.record.id);
        return Ok(());
    }
    output::success(format!("Created {} {}", def.icon, def.name), v);
    output::print(format!("  ID:    {}", entry.record.id), v);
    output::print(format!("  File:  {}", entry.path.display()), v);
    if let Some(name) = entry.record.title() {
        output::print(format!("  Name:  {}", name), v);
    }
    Ok(())
}
