//! `kpi show` -- display one KPI definition.

use anyhow::Result;

use crate::cli::ShowArgs;
use crate::context::RuntimeContext;
use crate::output::{format_definition_detail, output_json};

/// Execute the `kpi show` command.
pub fn run(ctx: &RuntimeContext, args: &ShowArgs) -> Result<()> {
    let def = ctx.registry()?.find(&args.id)?;

    if ctx.json {
        output_json(&def);
    } else {
        println!("{}", format_definition_detail(&def));
    }

    Ok(())
}
