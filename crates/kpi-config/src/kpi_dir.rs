//! Discovery of the `.kpi/` project directory.
//!
//! The `.kpi/` directory holds `config.yaml` and, optionally,
//! `definitions.toml` with user-defined KPIs. It is found by walking up
//! from the working directory.

use std::path::{Path, PathBuf};

/// The name of the project metadata directory.
pub const KPI_DIR_NAME: &str = ".kpi";

/// Environment variable that overrides discovery.
pub const KPI_DIR_ENV: &str = "KPI_DIR";

/// Walk up the directory tree from `start` looking for a `.kpi/` directory.
///
/// The `KPI_DIR` environment variable is checked first. Returns `None` if
/// the filesystem root is reached without finding one.
pub fn find_kpi_dir(start: &Path) -> Option<PathBuf> {
    search(std::env::var_os(KPI_DIR_ENV).map(PathBuf::from), start)
}

/// Discovery with the override passed in, so it can run without touching
/// the process environment.
fn search(override_dir: Option<PathBuf>, start: &Path) -> Option<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| d.is_dir()) {
        return Some(dir);
    }

    let start = start.canonicalize().ok()?;

    let mut current = start.as_path();
    loop {
        let candidate = current.join(KPI_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent;
            }
            _ => break,
        }
    }

    None
}
