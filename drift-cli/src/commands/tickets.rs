//! Tickets command - Issue keys referenced by the commits between git refs

use drift_core::tickets::{extract_tickets, ticket_regex};

use super::verify_refs;
use crate::config::DriftConfig;
use crate::git;
use crate::output::{Output, OutputFormat};
use crate::report::TicketReport;

/// Collect ticket keys from the subjects of `base_ref..head_ref`.
pub async fn load(
    base_ref: &str,
    head_ref: &str,
    pattern: Option<&str>,
    config: &DriftConfig,
) -> anyhow::Result<TicketReport> {
    let regex = ticket_regex(pattern.or(config.ticket_pattern()))?;

    verify_refs(base_ref, head_ref).await?;
    let subjects = git::log_subjects(base_ref, head_ref).await?;
    let tickets = extract_tickets(subjects.iter().map(String::as_str), &regex);

    tracing::info!(
        "Found {} tickets in {} commits",
        tickets.len(),
        subjects.len()
    );

    Ok(TicketReport {
        base: base_ref.to_string(),
        head: head_ref.to_string(),
        tickets,
        url: config.ticket_url().to_string(),
    })
}

/// Run the tickets command
pub async fn run(
    base_ref: &str,
    head_ref: &str,
    pattern: Option<&str>,
    config: &DriftConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let report = load(base_ref, head_ref, pattern, config).await?;
    Output::new(report, format).render()
}
