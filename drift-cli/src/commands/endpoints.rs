//! Endpoints command - Added and removed API operations between git refs

use drift_core::differ::diff_endpoints;
use drift_core::extract::openapi;

use super::{document_at_refs, openapi_path};
use crate::config::DriftConfig;
use crate::output::{Output, OutputFormat};
use crate::report::EndpointReport;

/// Diff the operations of the OpenAPI document at two revisions.
pub async fn load(
    base_ref: &str,
    head_ref: &str,
    file: Option<&str>,
    config: &DriftConfig,
) -> anyhow::Result<EndpointReport> {
    let path = openapi_path(file, config)?;
    let (old_source, new_source) = document_at_refs(base_ref, head_ref, &path).await?;

    let old = openapi::extract_endpoints(&old_source)?;
    let new = openapi::extract_endpoints(&new_source)?;
    let endpoints = diff_endpoints(&old, &new);

    tracing::info!(
        "Endpoints: {} added, {} removed",
        endpoints.added_count(),
        endpoints.removed_count()
    );

    Ok(EndpointReport {
        base: base_ref.to_string(),
        head: head_ref.to_string(),
        endpoints,
    })
}

/// Run the endpoints command
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
