//! KPI definition -- a named formula over financial variables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::Category;

/// A named KPI formula.
///
/// Definitions are immutable once created. Built-in definitions can never
/// be deleted; user-defined ones can be removed from their registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiDefinition {
    /// Unique identifier within a registry.
    pub id: String,

    /// Human-readable label.
    pub name: String,

    /// Arithmetic expression over variable names, e.g.
    /// `Operating_Cash_Flow / Total_Debt`.
    pub formula: String,

    /// Display grouping only.
    #[serde(default)]
    pub category: Category,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// `true` for definitions shipped with the registry.
    #[serde(default)]
    pub is_built_in: bool,

    /// Set once at creation.
    pub created_at: DateTime<Utc>,
}

impl KpiDefinition {
    /// Builds a built-in definition with a fixed id.
    pub fn built_in(
        id: &str,
        name: &str,
        formula: &str,
        category: Category,
        description: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            formula: formula.to_owned(),
            category,
            description: description.to_owned(),
            is_built_in: true,
            created_at,
        }
    }
}
