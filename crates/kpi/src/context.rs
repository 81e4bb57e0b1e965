//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what every command handler needs: global
//! flags, the discovered `.kpi/` directory, and the loaded configuration.
//! Registries and bindings are built on demand since not every command
//! needs them.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

use kpi_config::{KpiConfig, find_kpi_dir, load_config};
use kpi_core::Bindings;
use kpi_registry::Registry;
use kpi_registry::loader::{load_bindings, load_definitions, register_all};

use crate::cli::{BindingsArgs, GlobalArgs};

/// Runtime context passed to every command handler.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,

    /// Discovered `.kpi/` directory, if any.
    pub kpi_dir: Option<PathBuf>,

    /// Merged configuration.
    pub config: KpiConfig,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// Discovers `.kpi/` from the current directory and loads configuration
    /// from it, the `--config` file, and `KPI_*` variables.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let cwd = env::current_dir().context("failed to read current directory")?;
        let kpi_dir = find_kpi_dir(&cwd);
        let config = load_config(kpi_dir.as_deref(), global.config.as_deref())
            .context("failed to load configuration")?;

        Ok(Self {
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
            kpi_dir,
            config,
        })
    }

    /// Directory that relative paths from configuration are resolved
    /// against: the project root holding `.kpi/`, else the working directory.
    fn project_root(&self) -> Option<&Path> {
        self.kpi_dir.as_deref().and_then(Path::parent)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match self.project_root() {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Builds the registry: built-ins plus the user definitions file.
    pub fn registry(&self) -> Result<Registry> {
        let mut registry = Registry::with_prefix(&self.config.id_prefix);

        let path = match &self.config.definitions {
            Some(configured) => Some(self.resolve(configured)),
            None => self.config.definitions_path(self.kpi_dir.as_deref()),
        };

        if let Some(path) = path {
            let defs = load_definitions(&path)
                .with_context(|| format!("failed to load definitions from {}", path.display()))?;
            register_all(&mut registry, &defs)
                .with_context(|| format!("invalid definition in {}", path.display()))?;
            debug!(path = %path.display(), count = defs.len(), "registered user KPIs");
        }

        Ok(registry)
    }

    /// Resolves the bindings snapshot.
    ///
    /// Priority: `--bindings` file > config `bindings` > built-in sample.
    /// `--var NAME=VALUE` overrides are applied on top.
    pub fn bindings(&self, args: &BindingsArgs) -> Result<Bindings> {
        let path = match (&args.bindings, &self.config.bindings) {
            (Some(flag), _) => Some(flag.clone()),
            (None, Some(configured)) => Some(self.resolve(configured)),
            (None, None) => None,
        };

        let mut bindings = match path {
            Some(path) => load_bindings(&path)
                .with_context(|| format!("failed to load bindings from {}", path.display()))?,
            None => Bindings::sample(),
        };

        for var in &args.vars {
            let (name, value) = parse_var(var)?;
            bindings.insert(name, value);
        }

        Ok(bindings)
    }

    /// The subject label: the flag if given, else the configured default.
    pub fn subject<'a>(&'a self, flag: Option<&'a str>) -> &'a str {
        flag.unwrap_or(&self.config.default_subject)
    }
}

/// Parses a `NAME=VALUE` override.
fn parse_var(raw: &str) -> Result<(String, f64)> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("invalid --var '{}': expected NAME=VALUE", raw);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("invalid --var '{}': name is empty", raw);
    }
    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("invalid --var '{}': value is not a number", raw))?;
    Ok((name.to_string(), value))
}
