//! Core types for the KPI formula engine.
//!
//! This crate holds the domain model shared by the evaluator, the registry
//! and the CLI: KPI definitions, variable bindings, evaluation results,
//! registration validation and id generation.

pub mod bindings;
pub mod definition;
pub mod enums;
pub mod idgen;
pub mod result;
pub mod validation;

pub use bindings::{Bindings, FINANCIAL_VARIABLES};
pub use definition::KpiDefinition;
pub use enums::Category;
pub use result::EvaluationResult;
