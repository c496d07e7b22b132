//! Drift configuration loading from `.driftrc.toml`.
//!
//! Configuration is optional; every setting has a default and command-line
//! flags take precedence over the file.
//!
//! # Example Configuration
//!
//! ```toml
//! [models]
//! folder = "src/main/java/se/sundsvall/casedata/api/model"
//!
//! [openapi]
//! file = "src/main/resources/openapi.yaml"
//!
//! [diff]
//! field_rename_threshold = 0.8
//! type_rename_threshold = 0.6
//!
//! [tickets]
//! enabled = true
//! pattern = "UF-\\d+"
//! url = "https://jira.sundsvall.se/browse/"
//!
//! [output]
//! format = "markdown"
//! color = false
//!
//! [changelog]
//! directory = "changelog"
//! ```

use std::path::Path;

use drift_core::tickets::DEFAULT_TICKET_URL;
use drift_core::DiffOptions;
use serde::Deserialize;

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_CHANGELOG_DIR, DEFAULT_OPENAPI_FILE_NAME};

/// Root configuration structure loaded from `.driftrc.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct DriftConfig {
    /// Java model classes to diff.
    #[serde(default)]
    pub models: ModelsConfig,

    /// Location of the OpenAPI document.
    #[serde(default)]
    pub openapi: OpenApiConfig,

    /// Rename inference thresholds.
    #[serde(default)]
    pub diff: DiffConfig,

    /// Issue references in commit subjects.
    #[serde(default)]
    pub tickets: TicketsConfig,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,

    /// Changelog file placement.
    #[serde(default)]
    pub changelog: ChangelogConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct ModelsConfig {
    /// Folder holding the model classes, relative to the repository root.
    ///
    /// When unset, `drift changelog` leaves out the model section.
    #[serde(default)]
    pub folder: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct OpenApiConfig {
    /// Explicit path to the document. Skips the work tree search.
    #[serde(default)]
    pub file: Option<String>,

    /// File name searched for when `file` is unset.
    ///
    /// Default: `openapi.yaml`
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Rename thresholds; unset values keep the engine defaults.
#[derive(Debug, Deserialize, Default)]
pub struct DiffConfig {
    #[serde(default)]
    pub field_rename_threshold: Option<f64>,

    #[serde(default)]
    pub type_rename_threshold: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct TicketsConfig {
    /// Include the ticket section in `drift changelog`.
    #[serde(default)]
    pub enabled: bool,

    /// Regex matching a ticket key.
    #[serde(default)]
    pub pattern: Option<String>,

    /// Prefix a ticket key is appended to when linking.
    #[serde(default)]
    pub url: Option<String>,
}

/// Output formatting preferences.
///
/// Command-line flags (e.g., `--format json`) override these settings.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default output format: `table`, `json` or `markdown`.
    #[serde(default)]
    pub format: Option<String>,

    /// Force colored output on or off. Unset means auto-detect.
    #[serde(default)]
    pub color: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ChangelogConfig {
    /// Directory changelog files are written to.
    ///
    /// Default: `changelog`
    #[serde(default)]
    pub directory: Option<String>,
}

impl DriftConfig {
    /// Load configuration from `.driftrc.toml` in the given directory.
    ///
    /// A missing file yields defaults. Read and parse errors are logged as
    /// warnings and also yield defaults.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILE_NAME, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILE_NAME, e);
                }
            }
        }
        Self::default()
    }

    /// Diff options with configured thresholds applied over the defaults.
    pub fn diff_options(&self) -> drift_core::Result<DiffOptions> {
        let defaults = DiffOptions::default();
        DiffOptions::new(
            self.diff
                .field_rename_threshold
                .unwrap_or(defaults.field_rename_threshold),
            self.diff
                .type_rename_threshold
                .unwrap_or(defaults.type_rename_threshold),
        )
    }

    pub fn model_folder(&self) -> Option<&str> {
        self.models.folder.as_deref()
    }

    pub fn openapi_file(&self) -> Option<&str> {
        self.openapi.file.as_deref()
    }

    pub fn openapi_file_name(&self) -> &str {
        self.openapi
            .file_name
            .as_deref()
            .unwrap_or(DEFAULT_OPENAPI_FILE_NAME)
    }

    pub fn tickets_enabled(&self) -> bool {
        self.tickets.enabled
    }

    /// Configured ticket pattern; `None` means the built-in one.
    pub fn ticket_pattern(&self) -> Option<&str> {
        self.tickets.pattern.as_deref()
    }

    pub fn ticket_url(&self) -> &str {
        self.tickets.url.as_deref().unwrap_or(DEFAULT_TICKET_URL)
    }

    /// Get the default output format, if configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Returns the configured value, or `None` to use auto-detection.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }

    pub fn changelog_directory(&self) -> &str {
        self.changelog
            .directory
            .as_deref()
            .unwrap_or(DEFAULT_CHANGELOG_DIR)
    }
}
