//! `kpi list` -- list KPI definitions.

use anyhow::Result;

use kpi_core::{Category, KpiDefinition};
use kpi_ui::styles::{render_kpi_line, render_muted};

use crate::cli::ListArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `kpi list` command.
pub fn run(ctx: &RuntimeContext, args: &ListArgs) -> Result<()> {
    let registry = ctx.registry()?;
    let category = args.category.as_deref().map(Category::parse_lenient);

    let defs: Vec<KpiDefinition> = registry
        .list()
        .into_iter()
        .filter(|d| category.as_ref().is_none_or(|c| &d.category == c))
        .filter(|d| !args.built_in || d.is_built_in)
        .filter(|d| !args.user || !d.is_built_in)
        .collect();

    if ctx.json {
        output_json(&defs);
        return Ok(());
    }

    if ctx.quiet {
        for def in &defs {
            println!("{}", def.id);
        }
        return Ok(());
    }

    if defs.is_empty() {
        println!("No KPIs found.");
        return Ok(());
    }

    for def in &defs {
        println!("{}", render_kpi_line(def));
    }

    let built_in = defs.iter().filter(|d| d.is_built_in).count();
    println!();
    println!(
        "{}",
        render_muted(&format!(
            "{} KPI(s): {} built-in, {} user-defined",
            defs.len(),
            built_in,
            defs.len() - built_in
        ))
    );

    Ok(())
}
