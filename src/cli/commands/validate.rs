//! validate command - Check a JSON file against its type's schema

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use serde::Serialize;

use crate::cli::Context;
use crate::core::payload::load_document;
use crate::core::validate::ValidationError;
use crate::ui::output;

#[derive(Serialize)]
struct Report<'a> {
    file: &'a Path,
    #[serde(rename = "type")]
    type_slug: &'a str,
    valid: bool,
    errors: &'a [ValidationError],
}

/// Validate a file, failing if it has any findings.
pub fn validate(ctx: &Context, file: &Path, json: bool) -> Result<()> {
    let doc = load_document(file)
        .with_context(|| format!("Failed to load '{}'", file.display()))?;
    let store = ctx.store();
    let def = store.resolve(&doc.type_slug)?;
    let errors = store.validate_document(&doc)?;

    if ctx.json(json) {
        output::json(&Report {
            file,
            type_slug: &doc.type_slug,
            valid: errors.is_empty(),
            errors: &errors,
        })?;
    } else if errors.is_empty() {
        output::success(format!("Valid {} {}", def.icon, def.name), ctx.verbosity);
    } else {
        output::print(
            format!("✘ {} validation error(s):", errors.len()),
            ctx.verbosity,
        );
        for error in &errors {
            output::print(format!("    • {}", error), ctx.verbosity);
        }
    }

    if !errors.is_empty() {
        bail!(
            "{} does not match the {} schema",
            file.display(),
            def.slug
        );
    }
    Ok(())
}
