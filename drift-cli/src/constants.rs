//! Shared constants for the Drift CLI.

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".driftrc.toml";

/// Directory changelog files are written to unless configured.
pub const DEFAULT_CHANGELOG_DIR: &str = "changelog";

/// OpenAPI document searched for in the work tree unless configured.
pub const DEFAULT_OPENAPI_FILE_NAME: &str = "openapi.yaml";

/// Extension of model class files.
pub const JAVA_EXTENSION: &str = ".java";

/// Spinner tick interval in milliseconds.
pub const SPINNER_TICK_MS: u64 = 100;
