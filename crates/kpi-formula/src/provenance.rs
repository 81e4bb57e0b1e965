//! Provenance: which inputs a result was computed from.

use chrono::Utc;
use kpi_core::{Bindings, EvaluationResult, KpiDefinition};

use crate::engine::{evaluate_formula, mentions};
use crate::types::FormulaError;

/// The bindings whose names appear as whole words in `formula`, in
/// bindings order.
pub fn used_bindings(formula: &str, bindings: &Bindings) -> Bindings {
    bindings.filtered(|name, _| mentions(formula, name))
}

/// Evaluates a definition and packages the value with its provenance.
pub fn build_result(
    definition: &KpiDefinition,
    bindings: &Bindings,
    subject_label: &str,
) -> Result<EvaluationResult, FormulaError> {
    let value = evaluate_formula(&definition.formula, bindings)?;
    Ok(EvaluationResult {
        definition_id: definition.id.clone(),
        subject_label: subject_label.to_owned(),
        formula: definition.formula.clone(),
        value,
        evaluated_at: Utc::now(),
        used_bindings: used_bindings(&definition.formula, bindings),
    })
}
