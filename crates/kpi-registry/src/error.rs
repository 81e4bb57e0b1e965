//! Registry error types.

use kpi_core::validation::ValidationError;
use kpi_formula::FormulaError;

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Registration input was malformed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No definition with the given id exists.
    #[error("KPI not found: {id}")]
    NotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// Attempted to delete a built-in definition.
    #[error("built-in KPI {id} cannot be deleted")]
    Immutable {
        /// The built-in identifier.
        id: String,
    },

    /// Evaluating the formula failed.
    #[error(transparent)]
    Formula(#[from] FormulaError),

    /// A thread panicked while holding the registry lock.
    #[error("registry lock poisoned: {0}")]
    Lock(String),
}

/// Convenience alias used throughout the registry crate.
pub type Result<T> = std::result::Result<T, RegistryError>;

impl RegistryError {
    // -- Constructors --------------------------------------------------------

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn immutable(id: impl Into<String>) -> Self {
        Self::Immutable { id: id.into() }
    }

    // -- Predicates ----------------------------------------------------------

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_immutable(&self) -> bool {
        matches!(self, Self::Immutable { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_invalid_expression(&self) -> bool {
        matches!(self, Self::Formula(FormulaError::InvalidExpression(_)))
    }

    pub fn is_division_by_zero(&self) -> bool {
        matches!(self, Self::Formula(FormulaError::DivisionByZero))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            RegistryError::not_found("kpi-1").to_string(),
            "KPI not found: kpi-1"
        );
        assert_eq!(
            RegistryError::immutable("operating_cf_debt").to_string(),
            "built-in KPI operating_cf_debt cannot be deleted"
        );
        assert_eq!(
            RegistryError::from(FormulaError::DivisionByZero).to_string(),
            "division by zero"
        );
    }

    #[test]
    fn predicates() {
        assert!(RegistryError::not_found("x").is_not_found());
        assert!(RegistryError::immutable("x").is_immutable());
        assert!(RegistryError::from(ValidationError::NameRequired).is_validation());
        assert!(RegistryError::from(FormulaError::DivisionByZero).is_division_by_zero());
        assert!(
            RegistryError::from(FormulaError::InvalidExpression("x".into()))
                .is_invalid_expression()
        );
    }
}
