//! Reports produced by the diff commands.

use colored::Colorize;
use serde::Serialize;

use drift_core::differ::{ChangeEntry, ChangeStatus, Changelog, EndpointDiff};
use drift_core::exporter::markdown;
use drift_core::tickets;

use crate::output::{TableDisplay, TableOutput};

/// Type-level changes between two catalogs.
#[derive(Debug, Serialize)]
pub struct CatalogReport {
    /// What was compared: `models`, `components` or `catalog`
    pub source: String,
    pub base: String,
    pub head: String,
    pub changelog: Changelog,
    /// Inputs left out because they could not be parsed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

impl CatalogReport {
    fn push_group(&self, status: ChangeStatus, output: &mut String) {
        let entries = self.changelog.with_status(status);
        if entries.is_empty() {
            return;
        }

        let title = status.as_str().to_uppercase();
        let title = match status {
            ChangeStatus::Added => title.green().bold(),
            ChangeStatus::Removed => title.red().bold(),
            ChangeStatus::Modified => title.yellow().bold(),
            ChangeStatus::Renamed => title.cyan().bold(),
        };
        output.push_str(&format!("{} ({}):\n", title, entries.len()));

        for (name, entry) in entries {
            match status {
                ChangeStatus::Added => output.push_str(&format!(
                    "  + {} {}\n",
                    name.green(),
                    field_count(entry.fields.len()).dimmed()
                )),
                ChangeStatus::Removed => output.push_str(&format!(
                    "  - {} {}\n",
                    name.red(),
                    field_count(entry.fields.len()).dimmed()
                )),
                ChangeStatus::Modified => {
                    output.push_str(&format!("  ~ {}\n", name.yellow()));
                    push_field_lines(entry, output);
                }
                ChangeStatus::Renamed => {
                    output.push_str(&format!(
                        "  > {} -> {}\n",
                        entry.old_name.as_deref().unwrap_or_default().dimmed(),
                        name.cyan()
                    ));
                    push_field_lines(entry, output);
                }
            }
        }
        output.push('\n');
    }
}

fn field_count(count: usize) -> String {
    match count {
        1 => "(1 field)".to_string(),
        n => format!("({} fields)", n),
    }
}

fn push_field_lines(entry: &ChangeEntry, output: &mut String) {
    for (field, label) in &entry.added_fields {
        output.push_str(&format!("      + {}: {}\n", field.green(), label));
    }
    for (field, label) in &entry.removed_fields {
        output.push_str(&format!("      - {}: {}\n", field.red(), label));
    }
    for field in &entry.renamed_fields {
        output.push_str(&format!(
            "      > {} -> {}: {} -> {}\n",
            field.old_name.dimmed(),
            field.new_name.cyan(),
            field.old_type.dimmed(),
            field.new_type
        ));
    }
    for field in &entry.changed_type_fields {
        output.push_str(&format!(
            "      ~ {}: {} -> {}\n",
            field.name.yellow(),
            field.old_type.dimmed(),
            field.new_type
        ));
    }
}

impl TableDisplay for CatalogReport {
    fn to_table(&self) -> String {
        let mut output = format!(
            "{} {} -> {}\n",
            format!("{}:", self.source.to_uppercase()).cyan().bold(),
            self.base.yellow(),
            self.head.green()
        );
        output.push_str(&format!("{}\n\n", self.changelog.summary.text()));

        for path in &self.skipped {
            output.push_str(&format!("{} {}\n", "skipped:".yellow(), path.dimmed()));
        }
        if !self.skipped.is_empty() {
            output.push('\n');
        }

        if self.changelog.is_empty() {
            output.push_str(&format!("{}\n", "No changes detected.".dimmed()));
            return output;
        }

        for status in [
            ChangeStatus::Added,
            ChangeStatus::Removed,
            ChangeStatus::Modified,
            ChangeStatus::Renamed,
        ] {
            self.push_group(status, &mut output);
        }

        let summary = &self.changelog.summary;
        output.push_str(&TableOutput::format_counts(&[
            ("types added", summary.types_added as usize),
            ("types removed", summary.types_removed as usize),
            ("types modified", summary.types_modified as usize),
            ("types renamed", summary.types_renamed as usize),
            ("fields added", summary.fields_added as usize),
            ("fields removed", summary.fields_removed as usize),
            ("fields renamed", summary.fields_renamed as usize),
            ("fields retyped", summary.fields_retyped as usize),
        ]));
        output.push('\n');

        output
    }

    fn to_markdown(&self) -> String {
        markdown::changelog(&self.changelog)
    }
}

/// Added and removed endpoints between two revisions.
#[derive(Debug, Serialize)]
pub struct EndpointReport {
    pub base: String,
    pub head: String,
    pub endpoints: EndpointDiff,
}

impl TableDisplay for EndpointReport {
    fn to_table(&self) -> String {
        let mut output = format!(
            "{} {} -> {}\n",
            "ENDPOINTS:".cyan().bold(),
            self.base.yellow(),
            self.head.green()
        );
        output.push_str(&format!(
            "{} added, {} removed\n\n",
            self.endpoints.added_count().to_string().green(),
            self.endpoints.removed_count().to_string().red()
        ));

        if self.endpoints.is_empty() {
            output.push_str(&format!("{}\n", "No changes detected.".dimmed()));
            return output;
        }

        let mut rows = Vec::new();
        for tag in self.endpoints.tags() {
            let added = self.endpoints.added.get(tag).into_iter().flatten();
            let removed = self.endpoints.removed.get(tag).into_iter().flatten();
            for (change, endpoint) in added
                .map(|e| ("added", e))
                .chain(removed.map(|e| ("removed", e)))
            {
                rows.push(vec![
                    tag.to_string(),
                    change.to_string(),
                    endpoint.method.clone(),
                    endpoint.path.clone(),
                ]);
            }
        }
        output.push_str(&TableOutput::from_rows(
            &["Tag", "Change", "Method", "Path"],
            &rows,
        ));
        output.push('\n');

        output
    }

    fn to_markdown(&self) -> String {
        markdown::endpoints(&self.endpoints)
    }
}

/// Ticket keys referenced by the commits between two revisions.
#[derive(Debug, Serialize)]
pub struct TicketReport {
    pub base: String,
    pub head: String,
    pub tickets: Vec<String>,
    pub url: String,
}

impl TableDisplay for TicketReport {
    fn to_table(&self) -> String {
        let mut output = format!(
            "{} {}..{}\n",
            "TICKETS:".cyan().bold(),
            self.base.yellow(),
            self.head.green()
        );

        if self.tickets.is_empty() {
            output.push_str(&format!("{}\n", "No tickets referenced.".dimmed()));
            return output;
        }

        for ticket in &self.tickets {
            output.push_str(&format!(
                "  {}  {}\n",
                ticket.bold(),
                format!("{}{}", self.url, ticket).dimmed()
            ));
        }
        output
    }

    fn to_markdown(&self) -> String {
        tickets::render_markdown(&self.tickets, &self.url)
    }
}
