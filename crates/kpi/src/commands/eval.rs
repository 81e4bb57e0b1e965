//! `kpi eval` -- evaluate a registered KPI against a bindings snapshot.

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::EvalArgs;
use crate::context::RuntimeContext;
use crate::output::{format_result, output_json};

/// Execute the `kpi eval` command.
pub fn run(ctx: &RuntimeContext, args: &EvalArgs) -> Result<()> {
    let registry = ctx.registry()?;
    let def = registry.find(&args.id)?;
    let bindings = ctx.bindings(&args.bindings)?;
    let subject = ctx.subject(args.subject.as_deref());

    debug!(id = %def.id, subject, bindings = bindings.len(), "evaluating");
    let result = registry
        .evaluate(&def.id, &bindings, subject)
        .with_context(|| format!("failed to evaluate {}", def.id))?;

    if ctx.json {
        output_json(&result);
    } else if ctx.quiet {
        println!("{}", result.format_value(ctx.config.precision));
    } else {
        println!("{}", format_result(&result, &def.name, &ctx.config));
    }

    Ok(())
}
