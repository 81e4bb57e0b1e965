//! [`Registry`] -- owned collection of KPI definitions.

use chrono::Utc;
use tracing::{debug, info};

use kpi_core::idgen::{self, DEFAULT_PREFIX};
use kpi_core::validation::validate_new;
use kpi_core::{Bindings, Category, EvaluationResult, KpiDefinition};

use crate::builtins;
use crate::error::{RegistryError, Result};

/// Built-in and user-defined KPI definitions.
///
/// Built-ins come first in declaration order, user-defined entries follow
/// in creation order. Definitions are handed out as clones and can only be
/// changed through [`Registry::register`] and [`Registry::delete`].
#[derive(Debug, Clone)]
pub struct Registry {
    built_ins: Vec<KpiDefinition>,
    user_defined: Vec<KpiDefinition>,
    id_prefix: String,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates a registry holding the built-in KPIs.
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }

    /// Creates a registry holding the built-ins, generating user ids as
    /// `<prefix>-<hash>`.
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            built_ins: builtins::definitions(Utc::now()),
            user_defined: Vec::new(),
            id_prefix: prefix.to_owned(),
        }
    }

    /// Creates a registry without built-ins.
    pub fn empty() -> Self {
        Self {
            built_ins: Vec::new(),
            user_defined: Vec::new(),
            id_prefix: DEFAULT_PREFIX.to_owned(),
        }
    }

    /// Registers a user-defined KPI.
    ///
    /// `name` and `formula` must be non-empty after trimming. The category
    /// is parsed leniently; unknown names become custom categories. The
    /// formula is stored as given (trimmed) and only checked on evaluation.
    pub fn register(
        &mut self,
        name: &str,
        formula: &str,
        category: &str,
        description: &str,
    ) -> Result<KpiDefinition> {
        validate_new(name, formula)?;

        let name = name.trim();
        let formula = formula.trim();
        let created_at = Utc::now();

        let mut nonce = 0;
        let id = loop {
            let candidate = idgen::generate_kpi_id(&self.id_prefix, name, formula, created_at, nonce);
            if !self.contains(&candidate) {
                break candidate;
            }
            nonce += 1;
        };

        let definition = KpiDefinition {
            id,
            name: name.to_owned(),
            formula: formula.to_owned(),
            category: Category::parse_lenient(category),
            description: description.trim().to_owned(),
            is_built_in: false,
            created_at,
        };

        info!(id = %definition.id, name = %definition.name, "registered KPI");
        self.user_defined.push(definition.clone());
        Ok(definition)
    }

    /// Deletes a user-defined KPI.
    ///
    /// Built-ins are refused with [`RegistryError::Immutable`].
    pub fn delete(&mut self, id: &str) -> Result<()> {
        if self.built_ins.iter().any(|d| d.id == id) {
            return Err(RegistryError::immutable(id));
        }
        let pos = self
            .user_defined
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| RegistryError::not_found(id))?;
        self.user_defined.remove(pos);
        info!(id, "deleted KPI");
        Ok(())
    }

    /// All definitions: built-ins first, then user-defined in creation order.
    pub fn list(&self) -> Vec<KpiDefinition> {
        self.iter().cloned().collect()
    }

    /// Looks up a definition by id across both sets.
    pub fn find(&self, id: &str) -> Result<KpiDefinition> {
        self.get(id)
            .cloned()
            .ok_or_else(|| RegistryError::not_found(id))
    }

    /// Evaluates a KPI against one subject's bindings.
    pub fn evaluate(
        &self,
        id: &str,
        bindings: &Bindings,
        subject_label: &str,
    ) -> Result<EvaluationResult> {
        let definition = self.get(id).ok_or_else(|| RegistryError::not_found(id))?;
        debug!(id, formula = %definition.formula, subject = subject_label, "evaluating KPI");
        let result = kpi_formula::build_result(definition, bindings, subject_label)?;
        debug!(id, value = result.value, "evaluated KPI");
        Ok(result)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Total number of definitions, built-ins included.
    pub fn len(&self) -> usize {
        self.built_ins.len() + self.user_defined.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn user_defined_count(&self) -> usize {
        self.user_defined.len()
    }

    fn get(&self, id: &str) -> Option<&KpiDefinition> {
        self.iter().find(|d| d.id == id)
    }

    fn iter(&self) -> impl Iterator<Item = &KpiDefinition> {
        self.built_ins.iter().chain(self.user_defined.iter())
    }
}
