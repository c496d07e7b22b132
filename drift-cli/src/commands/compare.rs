//! Compare command - Diff two catalog JSON files directly
//!
//! A catalog file maps type names to `{field: type label}` objects:
//!
//! ```json
//! {"User": {"id": "int", "email": "string"}}
//! ```

use std::path::Path;

use anyhow::Context;

use drift_core::differ::compare_catalogs_with;
use drift_core::types::{catalog_from_json, Catalog};

use crate::config::DriftConfig;
use crate::output::{Output, OutputFormat};
use crate::report::CatalogReport;

/// Read and validate a catalog file.
pub fn read_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    catalog_from_json(&content).with_context(|| format!("Failed to load {}", path.display()))
}

/// Run the compare command
pub async fn run(
    old_path: &str,
    new_path: &str,
    config: &DriftConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let old = read_catalog(Path::new(old_path))?;
    let new = read_catalog(Path::new(new_path))?;

    let changelog = compare_catalogs_with(&old, &new, &config.diff_options()?);

    let report = CatalogReport {
        source: "catalog".to_string(),
        base: old_path.to_string(),
        head: new_path.to_string(),
        changelog,
        skipped: Vec::new(),
    };
    Output::new(report, format).render()
}
