//! `kpi check` -- lint a formula without evaluating it.
//!
//! Unknown identifiers are warnings since another snapshot may bind them;
//! a malformed formula is an error.

use anyhow::{Result, bail};
use serde::Serialize;

use kpi_core::FINANCIAL_VARIABLES;
use kpi_formula::check_formula;
use kpi_ui::styles::{
    render_fail, render_fail_icon, render_pass, render_pass_icon, render_warn, render_warn_icon,
};

use crate::cli::CheckArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

#[derive(Serialize)]
struct CheckOutput<'a> {
    formula: &'a str,
    valid: bool,
    identifiers: &'a [String],
    unknown: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Execute the `kpi check` command.
pub fn run(ctx: &RuntimeContext, args: &CheckArgs) -> Result<()> {
    let bindings = ctx.bindings(&args.bindings)?;
    let mut known: Vec<&str> = FINANCIAL_VARIABLES.to_vec();
    known.extend(bindings.names().filter(|n| !FINANCIAL_VARIABLES.contains(n)));

    let check = check_formula(&args.formula, &known);
    let error = check.error.as_ref().map(ToString::to_string);

    if ctx.json {
        output_json(&CheckOutput {
            formula: &args.formula,
            valid: check.error.is_none(),
            identifiers: &check.identifiers,
            unknown: &check.unknown,
            error: error.clone(),
        });
    } else {
        for name in &check.unknown {
            println!("{} unknown variable {}", render_warn_icon(), render_warn(name));
        }
        match &error {
            Some(msg) => println!("{} {}", render_fail_icon(), render_fail(msg)),
            None if !ctx.quiet => {
                println!("{} {}", render_pass_icon(), render_pass("formula is well-formed"))
            }
            None => {}
        }
    }

    if let Some(msg) = error {
        bail!("{}", msg);
    }
    Ok(())
}
