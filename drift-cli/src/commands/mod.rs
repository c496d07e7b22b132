//! Command implementations for Drift CLI
//!
//! Each command module provides a `run` function that executes the command logic.
//! The revision-comparing commands also expose a `load` function returning their
//! report, which `changelog` combines into one document.

pub mod changelog;
pub mod compare;
pub mod completions;
pub mod components;
pub mod endpoints;
pub mod models;
pub mod tickets;

use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};

use drift_core::scanner;

use crate::config::DriftConfig;
use crate::constants::{CONFIG_FILE_NAME, SPINNER_TICK_MS};
use crate::git;

/// Fail early when either revision does not exist.
pub(crate) async fn verify_refs(base_ref: &str, head_ref: &str) -> anyhow::Result<()> {
    tokio::try_join!(git::verify_ref(base_ref), git::verify_ref(head_ref))?;
    Ok(())
}

/// Path of the OpenAPI document: flag, then config, then a work tree search.
pub(crate) fn openapi_path(file: Option<&str>, config: &DriftConfig) -> anyhow::Result<String> {
    if let Some(file) = file.or(config.openapi_file()) {
        return Ok(file.to_string());
    }

    let file_name = config.openapi_file_name();
    let found = scanner::find_file(Path::new("."), file_name)?.with_context(|| {
        format!(
            "No {} found in the work tree; pass --file or set [openapi] file in {}",
            file_name, CONFIG_FILE_NAME
        )
    })?;

    let relative = found.strip_prefix(".").unwrap_or(&found);
    tracing::info!("Using OpenAPI document {}", relative.display());
    Ok(relative.to_string_lossy().to_string())
}

/// The document at both revisions; a revision without it reads as empty.
pub(crate) async fn document_at_refs(
    base_ref: &str,
    head_ref: &str,
    path: &str,
) -> anyhow::Result<(String, String)> {
    verify_refs(base_ref, head_ref).await?;

    let (old, new) = tokio::try_join!(
        git::show_file(base_ref, path),
        git::show_file(head_ref, path)
    )?;

    Ok((old.unwrap_or_default(), new.unwrap_or_default()))
}

/// Spinner on stderr, hidden when stderr is not a terminal.
pub(crate) fn spinner(message: &str) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
    spinner.set_message(message.to_string());
    spinner
}
