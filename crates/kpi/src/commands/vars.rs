//! `kpi vars` -- print the bindings snapshot in use.

use anyhow::Result;

use crate::cli::VarsArgs;
use crate::context::RuntimeContext;
use crate::output::{format_bindings, output_json};

/// Execute the `kpi vars` command.
pub fn run(ctx: &RuntimeContext, args: &VarsArgs) -> Result<()> {
    let bindings = ctx.bindings(&args.bindings)?;

    if ctx.json {
        output_json(&bindings);
        return Ok(());
    }

    for line in format_bindings(&bindings, &ctx.config, "") {
        println!("{}", line);
    }
    Ok(())
}
