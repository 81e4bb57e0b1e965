//! Load KPI definitions and bindings snapshots from TOML, JSON, or YAML files.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use kpi_core::{Bindings, KpiDefinition};

use crate::error::RegistryError;
use crate::registry::Registry;

/// Errors that can occur while loading input files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A KPI definition as written in a definitions file, before registration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewKpi {
    pub name: String,
    pub formula: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
}

/// Root of a definitions file: a `kpi` array of tables.
#[derive(Debug, Deserialize)]
struct DefinitionsFile {
    #[serde(default)]
    kpi: Vec<NewKpi>,
}

/// JSON accepts either `{"kpi": [...]}` or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonDefinitions {
    File(DefinitionsFile),
    List(Vec<NewKpi>),
}

/// Parse definitions from a TOML string (`[[kpi]]` tables).
pub fn parse_definitions_toml(content: &str) -> Result<Vec<NewKpi>, LoadError> {
    toml::from_str::<DefinitionsFile>(content)
        .map(|f| f.kpi)
        .map_err(|e| LoadError::Parse(e.to_string()))
}

/// Parse definitions from a JSON string.
pub fn parse_definitions_json(content: &str) -> Result<Vec<NewKpi>, LoadError> {
    match serde_json::from_str::<JsonDefinitions>(content) {
        Ok(JsonDefinitions::File(f)) => Ok(f.kpi),
        Ok(JsonDefinitions::List(list)) => Ok(list),
        Err(e) => Err(LoadError::Parse(e.to_string())),
    }
}

/// Load definitions from a file (auto-detect TOML vs JSON by extension).
pub fn load_definitions(path: &Path) -> Result<Vec<NewKpi>, LoadError> {
    let content = std::fs::read_to_string(path)?;
    let defs = match extension(path) {
        Some("toml") => parse_definitions_toml(&content)?,
        Some("json") => parse_definitions_json(&content)?,
        _ => parse_definitions_json(&content).or_else(|_| parse_definitions_toml(&content))?,
    };
    debug!(path = %path.display(), count = defs.len(), "loaded KPI definitions");
    Ok(defs)
}

/// Parse a bindings snapshot from a JSON object.
pub fn parse_bindings_json(content: &str) -> Result<Bindings, LoadError> {
    serde_json::from_str(content).map_err(|e| LoadError::Parse(e.to_string()))
}

/// Parse a bindings snapshot from a TOML document of `Name = number` pairs.
pub fn parse_bindings_toml(content: &str) -> Result<Bindings, LoadError> {
    toml::from_str(content).map_err(|e| LoadError::Parse(e.to_string()))
}

/// Parse a bindings snapshot from a YAML mapping.
pub fn parse_bindings_yaml(content: &str) -> Result<Bindings, LoadError> {
    serde_yaml::from_str(content).map_err(|e| LoadError::Parse(e.to_string()))
}

/// Load a bindings snapshot (auto-detect format by extension; unknown
/// extensions try JSON, then TOML).
pub fn load_bindings(path: &Path) -> Result<Bindings, LoadError> {
    let content = std::fs::read_to_string(path)?;
    let bindings = match extension(path) {
        Some("json") => parse_bindings_json(&content)?,
        Some("toml") => parse_bindings_toml(&content)?,
        Some("yaml") | Some("yml") => parse_bindings_yaml(&content)?,
        _ => parse_bindings_json(&content).or_else(|_| parse_bindings_toml(&content))?,
    };
    debug!(path = %path.display(), count = bindings.len(), "loaded bindings");
    Ok(bindings)
}

/// Registers loaded definitions in file order.
///
/// Stops at the first invalid entry; entries before it stay registered.
pub fn register_all(
    registry: &mut Registry,
    defs: &[NewKpi],
) -> Result<Vec<KpiDefinition>, RegistryError> {
    defs.iter()
        .map(|d| registry.register(&d.name, &d.formula, &d.category, &d.description))
        .collect()
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}
