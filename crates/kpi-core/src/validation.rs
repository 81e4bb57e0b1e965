//! Registration input validation.

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("KPI name is required")]
    NameRequired,

    #[error("KPI formula is required")]
    FormulaRequired,
}

/// Validates the user-supplied parts of a new KPI definition.
///
/// `name` and `formula` must be non-empty after trimming. The formula is
/// not evaluated here.
pub fn validate_new(name: &str, formula: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if formula.trim().is_empty() {
        return Err(ValidationError::FormulaRequired);
    }
    Ok(())
}
