//! Output formatting helpers for the `kpi` CLI.
//!
//! JSON goes through [`output_json`]; human-readable text is assembled by
//! the `format_*` helpers so commands stay thin.

use std::io::{self, Write};

use serde::Serialize;

use kpi_config::KpiConfig;
use kpi_core::{Bindings, EvaluationResult, KpiDefinition};
use kpi_ui::styles::{
    render_accent, render_bold, render_category, render_muted, render_value,
};

/// Prints a value as pretty JSON to stdout.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Formats a monetary input as `{currency}{value} {unit}`.
pub fn format_amount(value: f64, config: &KpiConfig) -> String {
    let amount = format!("{}{}", config.currency, value);
    if config.unit.is_empty() {
        amount
    } else {
        format!("{} {}", amount, config.unit)
    }
}

/// Multi-line view of one definition.
pub fn format_definition_detail(def: &KpiDefinition) -> String {
    let kind = if def.is_built_in { "built-in" } else { "user-defined" };
    let mut out = format!(
        "{}  {}\n",
        render_bold(&def.id),
        render_bold(&def.name)
    );
    out.push_str(&format!("  Formula:   {}\n", render_accent(&def.formula)));
    out.push_str(&format!("  Category:  {}\n", render_category(&def.category)));
    out.push_str(&format!("  Kind:      {}\n", kind));
    if !def.description.is_empty() {
        out.push_str(&format!("  About:     {}\n", def.description));
    }
    out.push_str(&format!(
        "  Created:   {}",
        render_muted(&def.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
    ));
    out
}

/// Name/value lines for a bindings snapshot, aligned on the name column.
pub fn format_bindings(bindings: &Bindings, config: &KpiConfig, indent: &str) -> Vec<String> {
    let width = bindings.names().map(str::len).max().unwrap_or(0);
    bindings
        .iter()
        .map(|(name, value)| {
            format!(
                "{}{:<width$}  {}",
                indent,
                name,
                format_amount(value, config),
                width = width
            )
        })
        .collect()
}

/// Multi-line view of an evaluation result.
pub fn format_result(result: &EvaluationResult, name: &str, config: &KpiConfig) -> String {
    let mut lines = vec![
        format!("{}  {}", render_bold(&result.definition_id), name),
        format!("  Subject:  {}", result.subject_label),
        format!(
            "  Value:    {}",
            render_value(&result.format_value(config.precision))
        ),
        format!("  Formula:  {}", render_accent(&result.formula)),
    ];
    if result.used_bindings.is_empty() {
        lines.push(format!("  Inputs:   {}", render_muted("(none)")));
    } else {
        lines.push("  Inputs:".to_string());
        lines.extend(format_bindings(&result.used_bindings, config, "    "));
    }
    lines.join("\n")
}
