//! `kpi calc` -- evaluate an ad-hoc formula.

use anyhow::{Context, Result};
use serde::Serialize;

use kpi_core::Bindings;
use kpi_formula::{evaluate_formula, used_bindings};

use crate::cli::CalcArgs;
use crate::context::RuntimeContext;
use crate::output::{format_bindings, output_json};
use kpi_ui::styles::{render_muted, render_value};

#[derive(Serialize)]
struct CalcOutput<'a> {
    formula: &'a str,
    value: f64,
    used_bindings: Bindings,
}

/// Execute the `kpi calc` command.
pub fn run(ctx: &RuntimeContext, args: &CalcArgs) -> Result<()> {
    let bindings = ctx.bindings(&args.bindings)?;
    let formula = args.formula.trim();

    let value = evaluate_formula(formula, &bindings)
        .with_context(|| format!("failed to evaluate '{}'", formula))?;
    let used = used_bindings(formula, &bindings);

    if ctx.json {
        output_json(&CalcOutput {
            formula,
            value,
            used_bindings: used,
        });
        return Ok(());
    }

    println!("{}", render_value(&format!("{:.*}", ctx.config.precision, value)));
    if !ctx.quiet && !used.is_empty() {
        println!("{}", render_muted("Inputs:"));
        for line in format_bindings(&used, &ctx.config, "  ") {
            println!("{}", line);
        }
    }

    Ok(())
}
