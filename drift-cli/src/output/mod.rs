//! Output formatting module for Drift CLI
//!
//! Every report renders in three formats: table (colored, human-readable),
//! json (machine-readable) and markdown (changelog sections).

use clap::ValueEnum;
use serde::Serialize;
use std::str::FromStr;

mod json;
mod table;

pub use self::json::JsonOutput;
pub use self::table::TableOutput;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable colored format (default)
    #[default]
    Table,
    /// JSON format for machine consumption
    Json,
    /// Markdown changelog sections
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown output format: '{}'", s)),
        }
    }
}

/// Trait for reports that can be displayed in every output format.
pub trait TableDisplay: Serialize {
    /// Convert to colored terminal output
    fn to_table(&self) -> String;

    /// Convert to Markdown
    fn to_markdown(&self) -> String {
        self.to_table()
    }

    /// Convert to pretty-printed JSON
    fn to_json(&self) -> String {
        JsonOutput::format(self)
    }

    /// Render using the given format
    fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => self.to_table(),
            OutputFormat::Json => self.to_json(),
            OutputFormat::Markdown => self.to_markdown(),
        }
    }
}

/// Result wrapper printing a report in the selected format
pub struct Output<T> {
    data: T,
    format: OutputFormat,
}

impl<T: TableDisplay> Output<T> {
    pub fn new(data: T, format: OutputFormat) -> Self {
        Self { data, format }
    }

    /// Render the output to stdout
    pub fn render(&self) -> anyhow::Result<()> {
        println!("{}", self.render_to_string().trim_end());
        Ok(())
    }

    /// Get the rendered string without printing
    pub fn render_to_string(&self) -> String {
        self.data.render(self.format)
    }
}

/// Simple success message
#[derive(Debug, Serialize)]
pub struct SuccessMessage {
    pub message: String,
}

impl SuccessMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl TableDisplay for SuccessMessage {
    fn to_table(&self) -> String {
        use colored::Colorize;
        format!("{} {}", "SUCCESS:".green().bold(), self.message)
    }

    fn to_markdown(&self) -> String {
        self.message.clone()
    }
}
