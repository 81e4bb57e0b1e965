//! Evaluation result with provenance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bindings::Bindings;

/// The outcome of evaluating one KPI against one subject's bindings.
///
/// `used_bindings` holds only the inputs the formula references, so the
/// result can be audited without the full snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub definition_id: String,
    pub subject_label: String,
    pub formula: String,
    pub value: f64,
    pub evaluated_at: DateTime<Utc>,
    pub used_bindings: Bindings,
}

impl EvaluationResult {
    /// Formats the value with a fixed number of decimals.
    pub fn format_value(&self, precision: usize) -> String {
        format!("{:.*}", precision, self.value)
    }
}
