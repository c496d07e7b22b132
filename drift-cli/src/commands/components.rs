//! Components command - OpenAPI component schema changes between git refs

use drift_core::differ::compare_catalogs_with;
use drift_core::extract::openapi;

use super::{document_at_refs, openapi_path};
use crate::config::DriftConfig;
use crate::output::{Output, OutputFormat};
use crate::report::CatalogReport;

/// Diff the component schemas of the OpenAPI document at two revisions.
pub async fn load(
    base_ref: &str,
    head_ref: &str,
    file: Option<&str>,
    config: &DriftConfig,
) -> anyhow::Result<CatalogReport> {
    let path = openapi_path(file, config)?;
    let (old_source, new_source) = document_at_refs(base_ref, head_ref, &path).await?;

    let old = openapi::extract_schemas(&old_source)?;
    let new = openapi::extract_schemas(&new_source)?;
    let changelog = compare_catalogs_with(&old, &new, &config.diff_options()?);

    tracing::info!(
        "Compared {} schemas with {}: {}",
        old.len(),
        new.len(),
        changelog.summary.text()
    );

    Ok(CatalogReport {
        source: "components".to_string(),
        base: base_ref.to_string(),
        head: head_ref.to_string(),
        changelog,
        skipped: Vec::new(),
    })
}

/// Run the components command
pub async fn run(
    base_ref: &str,
    head_ref: &str,
    file: Option<&str>,
    config: &DriftConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let report = load(base_ref, head_ref, file, config).await?;
    Output::new(report, format).render()
}
