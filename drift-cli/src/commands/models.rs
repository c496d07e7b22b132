//! Models command - Java model class changes between git refs
//!
//! Every `.java` file below the model folder is read at both revisions,
//! parsed into a catalog of classes and diffed with rename inference.

use anyhow::Context;

use drift_core::differ::compare_catalogs_with;
use drift_core::extract::{extract_java_files, Extraction, SourceFile};

use super::{spinner, verify_refs};
use crate::config::DriftConfig;
use crate::constants::{CONFIG_FILE_NAME, JAVA_EXTENSION};
use crate::git;
use crate::output::{Output, OutputFormat};
use crate::report::CatalogReport;

/// Model folder from the flag, else from config.
pub(crate) fn model_folder<'a>(
    folder: Option<&'a str>,
    config: &'a DriftConfig,
) -> anyhow::Result<&'a str> {
    folder.or(config.model_folder()).with_context(|| {
        format!(
            "No model folder given; pass --folder or set [models] folder in {}",
            CONFIG_FILE_NAME
        )
    })
}

/// Read and parse the model classes at one revision.
async fn extract_at(git_ref: &str, folder: &str) -> anyhow::Result<Extraction> {
    let paths = git::list_files(git_ref, folder).await?;

    let mut files = Vec::new();
    for path in paths.into_iter().filter(|p| p.ends_with(JAVA_EXTENSION)) {
        if let Some(source) = git::show_file(git_ref, &path).await? {
            files.push(SourceFile::new(path, source));
        }
    }
    tracing::debug!("{} model files at {}", files.len(), git_ref);

    let extraction = tokio::task::spawn_blocking(move || extract_java_files(files, None)).await?;
    Ok(extraction)
}

/// Diff the model classes below `folder` at two revisions.
pub async fn load(
    base_ref: &str,
    head_ref: &str,
    folder: &str,
    config: &DriftConfig,
) -> anyhow::Result<CatalogReport> {
    let options = config.diff_options()?;
    verify_refs(base_ref, head_ref).await?;

    let progress = spinner(&format!("Reading model classes in {}...", folder));
    let (old, new) = tokio::try_join!(extract_at(base_ref, folder), extract_at(head_ref, folder))?;
    progress.finish_and_clear();

    let changelog = compare_catalogs_with(&old.catalog, &new.catalog, &options);
    tracing::info!(
        "Compared {} classes with {}: {}",
        old.catalog.len(),
        new.catalog.len(),
        changelog.summary.text()
    );

    let skipped = old
        .errors
        .iter()
        .map(|e| format!("{}: {}", base_ref, e))
        .chain(new.errors.iter().map(|e| format!("{}: {}", head_ref, e)))
        .collect();

    Ok(CatalogReport {
        source: "models".to_string(),
        base: base_ref.to_string(),
        head: head_ref.to_string(),
        changelog,
        skipped,
    })
}

/// Run the models command
pub async fn run(
    base_ref: &str,
    head_ref: &str,
    folder: Option<&str>,
    config: &DriftConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let folder = model_folder(folder, config)?;
    let report = load(base_ref, head_ref, folder, config).await?;
    Output::new(report, format).render()
}
