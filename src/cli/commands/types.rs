//! types command - List registered types and show their schemas

use anyhow::Result;

use crate::cli::Context;
use crate::core::registry::TypeDefinition;
use crate::ui::output;

/// List every registered type with its field names.
pub fn list(ctx: &Context) -> Result<()> {
    let v = ctx.verbosity;
    output::print(format!("{} types available:", ctx.registry.len()), v);
    output::print("", v);
    for def in ctx.registry.all() {
        output::print(format!("  {}  {} ({})", def.icon, def.name, def.slug), v);
        output::print(format!("     {}", def.description), v);
        output::print(
            format!(
                "     {} fields: {}",
                def.schema.len(),
                def.field_names().collect::<Vec<_>>().join(", ")
            ),
            v,
        );
        output::print("", v);
    }
    Ok(())
}

/// Show one type's schema.
pub fn show(ctx: &Context, slug: &str) -> Result<()> {
    let def = ctx.store().resolve(slug)?;
    print_type(def, ctx);
    Ok(())
}

fn print_type(def: &TypeDefinition, ctx: &Context) {
    let v = ctx.verbosity;
    output::print(format!("{}  {}", def.icon, def.name), v);
    output::print(format!("  {}", def.description), v);
    output::print(format!("  ID: {}  Slug: {}", def.id, def.slug), v);
    output::print("", v);
    output::print("  Fields:", v);

    let width = def.field_names().map(str::len).max().unwrap_or(0);
    for field in &def.schema {
        output::print(
            format!("    • {:<width$}  {}", field.name, field.kind, width = width),
            v,
        );
    }
}
