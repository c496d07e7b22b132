//! Drift Core - API changelog engine.
//!
//! This crate compares two snapshots of an API's data model and reports what
//! changed between them, inferring renames where names alone do not match.
//!
//! # Features
//!
//! - **Catalog diffing**: added, removed, modified and renamed types
//! - **Rename inference**: field and type renames from name and field-set similarity
//! - **Extraction**: Java model classes (tree-sitter) and OpenAPI schemas and endpoints
//! - **Ticket references**: issue keys collected from commit subjects
//! - **Export formats**: Markdown changelog sections, JSON
//!
//! # Usage
//!
//! ```
//! use drift_core::differ::compare_catalogs;
//! use drift_core::exporter::markdown;
//! use drift_core::types::catalog_from_json;
//!
//! let old = catalog_from_json(r#"{"User": {"age": "int"}}"#).unwrap();
//! let new = catalog_from_json(r#"{"User": {"age": "long"}}"#).unwrap();
//!
//! let changelog = compare_catalogs(&old, &new);
//! assert!(markdown::changelog(&changelog).contains("age: `int` -> `long`"));
//! ```

pub mod differ;
pub mod error;
pub mod exporter;
pub mod extract;
pub mod scanner;
pub mod tickets;
pub mod types;

pub use differ::{compare_catalogs, compare_catalogs_with, Changelog, DiffOptions};
pub use error::{DriftError, Result};
pub use types::{Catalog, FieldMap};

/// Get the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
