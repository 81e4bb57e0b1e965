//! Configuration management for the KPI engine CLI.
//!
//! This crate discovers the `.kpi/` project directory and loads
//! `.kpi/config.yaml` layered under `KPI_*` environment variables.

pub mod config;
pub mod kpi_dir;

pub use config::{ConfigError, KpiConfig, load_config};
pub use kpi_dir::find_kpi_dir;
