//! info command - Show project info and store location

use anyhow::Result;

use crate::cli::Context;
use crate::ui::output;

/// Show project info.
pub fn info(ctx: &Context) -> Result<()> {
    let v = ctx.verbosity;
    output::print("Minions skills", v);
    output::print(env!("CARGO_PKG_DESCRIPTION"), v);
    output::print("", v);
    output::print(format!("  Version: {}", env!("CARGO_PKG_VERSION")), v);
    output::print(format!("  Store:   {}", ctx.store_root.display()), v);
    output::print(format!("  Types:   {}", ctx.registry.len()), v);
    if let Some(path) = ctx.config.loaded_from() {
        output::print(format!("  Config:  {}", path.display()), v);
    }
    Ok(())
}
