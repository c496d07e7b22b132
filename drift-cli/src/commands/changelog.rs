//! Changelog command - Assemble the complete API changelog for a release
//!
//! The file `<dir>/changelog-<head>.md` gets a version header followed by the
//! endpoint and component sections, plus the model class and ticket sections
//! when enabled. Content already in the file is kept below the new sections.

use std::path::{Path, PathBuf};

use anyhow::Context;

use drift_core::exporter::markdown;

use super::{components, endpoints, models, tickets};
use crate::config::DriftConfig;
use crate::output::{Output, OutputFormat, SuccessMessage, TableDisplay};

/// Options of one changelog run.
#[derive(Debug)]
pub struct ChangelogOptions<'a> {
    pub base_ref: &'a str,
    pub head_ref: &'a str,
    /// OpenAPI document override
    pub file: Option<&'a str>,
    /// Model folder override; also enables the model class section
    pub folder: Option<&'a str>,
    /// Include the ticket section even when not enabled in config
    pub tickets: bool,
    /// Output directory override
    pub output_dir: Option<&'a str>,
    /// Print instead of writing the file
    pub stdout: bool,
}

/// Changelog file for `head_ref`; slashes in branch names become dashes.
pub fn changelog_path(dir: &Path, head_ref: &str) -> PathBuf {
    dir.join(format!("changelog-{}.md", head_ref.replace('/', "-")))
}

/// Version header, then each section, then whatever the file held before.
pub fn assemble(head_ref: &str, sections: &[String], existing: &str) -> String {
    let mut content = format!("# API-Changelog: version {}\n\n", head_ref);
    for section in sections {
        content.push_str(section.trim_end());
        content.push_str("\n\n");
    }
    content.push_str(existing);
    content
}

/// Render every enabled section.
async fn sections(options: &ChangelogOptions<'_>, config: &DriftConfig) -> anyhow::Result<Vec<String>> {
    let (base, head) = (options.base_ref, options.head_ref);

    let endpoint_report = endpoints::load(base, head, options.file, config).await?;
    let component_report = components::load(base, head, options.file, config).await?;
    let mut sections = vec![endpoint_report.to_markdown(), component_report.to_markdown()];

    if let Some(folder) = options.folder.or(config.model_folder()) {
        let model_report = models::load(base, head, folder, config).await?;
        sections.push(markdown::section(
            markdown::CLASSES_HEADING,
            &model_report.changelog,
        ));
    }

    if options.tickets || config.tickets_enabled() {
        let ticket_report = tickets::load(base, head, None, config).await?;
        sections.push(ticket_report.to_markdown());
    }

    Ok(sections)
}

/// Run the changelog command
pub async fn run(
    options: ChangelogOptions<'_>,
    config: &DriftConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let sections = sections(&options, config).await?;

    if options.stdout {
        print!("{}", assemble(options.head_ref, &sections, ""));
        return Ok(());
    }

    let dir = PathBuf::from(options.output_dir.unwrap_or(config.changelog_directory()));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = changelog_path(&dir, options.head_ref);
    let existing = if path.exists() {
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    } else {
        String::new()
    };

    std::fs::write(&path, assemble(options.head_ref, &sections, &existing))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote {} sections to {}", sections.len(), path.display());

    Output::new(
        SuccessMessage::new(format!("Wrote {}", path.display())),
        format,
    )
    .render()
}
