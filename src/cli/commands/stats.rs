//! stats command - Show record counts per type

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::ui::output;

const BAR_WIDTH: usize = 30;

/// Show record counts per type.
pub fn stats(ctx: &Context, json: bool) -> Result<()> {
    let stats = ctx.store().stats().context("Failed to count records")?;

    if ctx.json(json) {
        output::json(&stats)?;
        return Ok(());
    }

    let v = ctx.verbosity;
    output::print("Record statistics:", v);
    output::print("", v);
    for count in &stats.types {
        let icon = ctx
            .registry
            .resolve(count.slug.as_str())
            .map_or("?", |def| def.icon.as_str());
        output::print(
            format!(
                "  {}  {:<22} {:>4}  {}",
                icon,
                count.name,
                count.count,
                output::bar(count.count, BAR_WIDTH)
            ),
            v,
        );
    }
    output::print("", v);
    output::print(format!("  Total: {} record(s)", stats.total), v);
    output::print(format!("  Store: {}", ctx.store_root.display()), v);
    Ok(())
}
