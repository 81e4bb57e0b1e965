//! Configuration types and loading.
//!
//! The main entry point is [`KpiConfig`]. [`load_config`] layers, from
//! lowest to highest priority: built-in defaults, `.kpi/config.yaml`, an
//! explicit config file, and `KPI_*` environment variables
//! (`KPI_DEFAULT_SUBJECT` sets `default-subject`).

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the project configuration inside `.kpi/`.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// File name of the optional user-defined KPI file inside `.kpi/`.
pub const DEFINITIONS_FILE_NAME: &str = "definitions.toml";

/// Largest accepted display precision.
pub const MAX_PRECISION: usize = 12;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    /// A provider failed or the merged values did not fit [`KpiConfig`].
    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue {
        /// The configuration key that had an invalid value.
        key: String,
        /// A description of why the value is invalid.
        reason: String,
    },
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// KpiConfig
// ---------------------------------------------------------------------------

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KpiConfig {
    /// Prefix for user-defined KPI ids.
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    /// Decimals shown for results.
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Currency symbol shown before input values.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Unit shown after input values (e.g. `Cr`).
    #[serde(default = "default_unit")]
    pub unit: String,

    /// Subject label used when none is given.
    #[serde(default = "default_subject")]
    pub default_subject: String,

    /// User-defined KPI file. Defaults to `.kpi/definitions.toml` if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definitions: Option<PathBuf>,

    /// Bindings snapshot file. Defaults to the built-in sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bindings: Option<PathBuf>,

    /// `tracing` filter directive used with `--verbose`.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for KpiConfig {
    fn default() -> Self {
        Self {
            id_prefix: default_id_prefix(),
            precision: default_precision(),
            currency: default_currency(),
            unit: default_unit(),
            default_subject: default_subject(),
            definitions: None,
            bindings: None,
            log_filter: default_log_filter(),
        }
    }
}

fn default_id_prefix() -> String {
    "kpi".to_string()
}

fn default_precision() -> usize {
    2
}

fn default_currency() -> String {
    "\u{20B9}".to_string()
}

fn default_unit() -> String {
    "Cr".to_string()
}

fn default_subject() -> String {
    "Sample Co".to_string()
}

fn default_log_filter() -> String {
    "kpi=debug".to_string()
}

impl KpiConfig {
    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::InvalidValue {
                key: "precision".into(),
                reason: format!("must be at most {} (got {})", MAX_PRECISION, self.precision),
            });
        }
        if self.id_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "id-prefix".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// The definitions file to load: the configured path, or
    /// `.kpi/definitions.toml` when it exists.
    pub fn definitions_path(&self, kpi_dir: Option<&Path>) -> Option<PathBuf> {
        if let Some(ref p) = self.definitions {
            return Some(p.clone());
        }
        kpi_dir
            .map(|d| d.join(DEFINITIONS_FILE_NAME))
            .filter(|p| p.is_file())
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Builds the layered [`Figment`] without extracting it.
///
/// An explicit file is parsed as TOML when its extension is `.toml` and as
/// YAML otherwise.
pub fn figment(kpi_dir: Option<&Path>, explicit: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(KpiConfig::default()));

    if let Some(dir) = kpi_dir {
        figment = figment.merge(Yaml::file(dir.join(CONFIG_FILE_NAME)));
    }

    if let Some(path) = explicit {
        figment = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => figment.merge(Toml::file(path)),
            _ => figment.merge(Yaml::file(path)),
        };
    }

    figment.merge(Env::prefixed("KPI_").map(|key| key.as_str().replace('_', "-").into()))
}

/// Loads configuration for a project.
///
/// A missing `.kpi/config.yaml` is fine; a missing explicit file is an
/// error.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] for a missing explicit file,
/// [`ConfigError::Load`] for unreadable or mistyped values, and
/// [`ConfigError::InvalidValue`] for out-of-range values.
pub fn load_config(kpi_dir: Option<&Path>, explicit: Option<&Path>) -> Result<KpiConfig> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
    }

    let config: KpiConfig = figment(kpi_dir, explicit).extract()?;
    config.validate()?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let cfg = KpiConfig::default();
        assert_eq!(cfg.id_prefix, "kpi");
        assert_eq!(cfg.precision, 2);
        assert_eq!(cfg.unit, "Cr");
        assert!(cfg.definitions.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_no_sources_gives_defaults() {
        Jail::expect_with(|_jail| {
            let cfg = load_config(None, None).unwrap();
            assert_eq!(cfg, KpiConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_yaml_overrides_defaults() {
        Jail::expect_with(|jail| {
            std::fs::create_dir(jail.directory().join(".kpi")).unwrap();
            jail.create_file(
                ".kpi/config.yaml",
                "precision: 4\ndefault-subject: Infosys\n",
            )?;
            let cfg = load_config(Some(Path::new(".kpi")), None).unwrap();
            assert_eq!(cfg.precision, 4);
            assert_eq!(cfg.default_subject, "Infosys");
            assert_eq!(cfg.unit, "Cr");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            std::fs::create_dir(jail.directory().join(".kpi")).unwrap();
            jail.create_file(".kpi/config.yaml", "precision: 4\n")?;
            jail.set_env("KPI_PRECISION", 6);
            jail.set_env("KPI_DEFAULT_SUBJECT", "TCS");
            let cfg = load_config(Some(Path::new(".kpi")), None).unwrap();
            assert_eq!(cfg.precision, 6);
            assert_eq!(cfg.default_subject, "TCS");
            Ok(())
        });
    }

    #[test]
    fn test_explicit_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file("kpi.toml", "unit = \"Mn\"\nid-prefix = \"acme\"\n")?;
            let cfg = load_config(None, Some(Path::new("kpi.toml"))).unwrap();
            assert_eq!(cfg.unit, "Mn");
            assert_eq!(cfg.id_prefix, "acme");
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_config(None, Some(Path::new("/nonexistent/kpi.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_invalid_precision() {
        Jail::expect_with(|jail| {
            jail.create_file("kpi.yaml", "precision: 40\n")?;
            let err = load_config(None, Some(Path::new("kpi.yaml"))).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "precision"));
            Ok(())
        });
    }

    #[test]
    fn test_mistyped_value() {
        Jail::expect_with(|jail| {
            jail.create_file("kpi.yaml", "precision: lots\n")?;
            let err = load_config(None, Some(Path::new("kpi.yaml"))).unwrap_err();
            assert!(matches!(err, ConfigError::Load(_)));
            Ok(())
        });
    }

    #[test]
    fn test_definitions_path_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = KpiConfig::default();
        assert_eq!(cfg.definitions_path(Some(dir.path())), None);

        std::fs::write(dir.path().join(DEFINITIONS_FILE_NAME), "").unwrap();
        assert_eq!(
            cfg.definitions_path(Some(dir.path())),
            Some(dir.path().join(DEFINITIONS_FILE_NAME))
        );

        let explicit = KpiConfig {
            definitions: Some(PathBuf::from("mine.toml")),
            ..KpiConfig::default()
        };
        assert_eq!(
            explicit.definitions_path(Some(dir.path())),
            Some(PathBuf::from("mine.toml"))
        );
    }
}
