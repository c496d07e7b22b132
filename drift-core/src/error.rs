//! Error types for drift-core.

use thiserror::Error;

/// Result type alias for drift-core operations.
pub type Result<T> = std::result::Result<T, DriftError>;

/// Errors that can occur while loading catalogs or extracting them from source.
///
/// The diff engine itself is total; only the collaborators around it fail.
#[derive(Error, Debug)]
pub enum DriftError {
    /// A catalog document did not have the `{type: {field: label}}` shape.
    #[error("Invalid catalog: {message}")]
    InvalidCatalog {
        /// Description of the shape violation.
        message: String,
    },

    /// A rename threshold was outside `[0, 1]`.
    #[error("Invalid {name} threshold: {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold {
        /// Which threshold was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Source file could not be parsed.
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// Path of the file being parsed.
        path: String,
        /// Parser diagnostic.
        message: String,
    },

    /// Invalid ticket reference pattern.
    #[error("Invalid ticket pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// IO error while reading inputs.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl DriftError {
    pub(crate) fn invalid_catalog(message: impl Into<String>) -> Self {
        DriftError::InvalidCatalog {
            message: message.into(),
        }
    }

    pub(crate) fn parse(path: &str, message: impl Into<String>) -> Self {
        DriftError::Parse {
            path: path.to_string(),
            message: message.into(),
        }
    }
}
