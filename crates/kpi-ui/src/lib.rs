//! Terminal styling for the KPI engine CLI.
//!
//! Provides Ayu-themed colors for KPI listings and results, plus the
//! terminal detection that decides whether color is emitted at all.

pub mod styles;
pub mod terminal;
