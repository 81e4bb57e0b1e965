//! Formula evaluator for KPI definitions.
//!
//! A formula is plain text such as `Operating_Cash_Flow / Total_Debt`.
//! Evaluation substitutes bound variables as whole words, rejects any
//! post-substitution text that is not pure arithmetic, then parses and
//! evaluates it with a small recursive-descent parser. Nothing is ever
//! executed dynamically.

pub mod engine;
pub mod parser;
pub mod provenance;
pub mod types;

pub use engine::{
    FormulaCheck, check_formula, evaluate_expression, evaluate_formula, referenced_identifiers,
    substitute, validate_charset,
};
pub use parser::parse;
pub use provenance::{build_result, used_bindings};
pub use types::{BinaryOp, Expr, FormulaError};
