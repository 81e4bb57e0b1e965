//! [`SharedRegistry`] -- a [`Registry`] behind a read-write lock.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use kpi_core::{Bindings, EvaluationResult, KpiDefinition};

use crate::error::{RegistryError, Result};
use crate::registry::Registry;

/// Thread-safe registry handle.
///
/// Reads (list, find, evaluate) share the lock; register and delete take
/// it exclusively, so mutations are serialized relative to reads.
#[derive(Debug, Default)]
pub struct SharedRegistry {
    inner: RwLock<Registry>,
}

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: RwLock::new(registry),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Registry>> {
        self.inner
            .read()
            .map_err(|e| RegistryError::Lock(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Registry>> {
        self.inner
            .write()
            .map_err(|e| RegistryError::Lock(e.to_string()))
    }

    pub fn register(
        &self,
        name: &str,
        formula: &str,
        category: &str,
        description: &str,
    ) -> Result<KpiDefinition> {
        self.write()?.register(name, formula, category, description)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        self.write()?.delete(id)
    }

    pub fn list(&self) -> Result<Vec<KpiDefinition>> {
        Ok(self.read()?.list())
    }

    pub fn find(&self, id: &str) -> Result<KpiDefinition> {
        self.read()?.find(id)
    }

    pub fn evaluate(
        &self,
        id: &str,
        bindings: &Bindings,
        subject_label: &str,
    ) -> Result<EvaluationResult> {
        self.read()?.evaluate(id, bindings, subject_label)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Consumes the handle and returns the registry.
    pub fn into_inner(self) -> Result<Registry> {
        self.inner
            .into_inner()
            .map_err(|e| RegistryError::Lock(e.to_string()))
    }
}

impl From<Registry> for SharedRegistry {
    fn from(registry: Registry) -> Self {
        Self::new(registry)
    }
}
