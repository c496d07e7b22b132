//! Catalog diff engine with rename inference.
//!
//! Compares two snapshots of `{type: {field: label}}` and produces a
//! changelog of added, removed, modified and renamed types.
//!
//! # Stages
//!
//! - **Partition**: split type names into exact matches and leftovers
//! - **Field diff**: added, removed, renamed and retyped fields of a matched pair
//! - **Rename inference**: pair leftover types by name and field-set similarity
//!
//! # Example
//!
//! ```
//! use drift_core::differ::{compare_catalogs, ChangeStatus};
//! use drift_core::types::Catalog;
//!
//! let old: Catalog = serde_json::from_str(r#"{"Customer": {"id": "int", "email": "string"}}"#).unwrap();
//! let new: Catalog = serde_json::from_str(r#"{"Client": {"id": "int", "email": "string"}}"#).unwrap();
//!
//! let changelog = compare_catalogs(&old, &new);
//! let entry = changelog.get("Client").unwrap();
//! assert_eq!(entry.status, ChangeStatus::Renamed);
//! assert_eq!(entry.old_name.as_deref(), Some("Customer"));
//! ```

pub mod changes;
pub mod comparator;
pub mod endpoints;
pub mod fields;
pub mod partition;
pub mod renames;
pub mod similarity;

pub use changes::{
    ChangeEntry, ChangeStatus, ChangedTypeField, Changelog, ChangelogSummary, FieldDiff,
    RenamedField,
};
pub use comparator::{compare_catalogs, compare_catalogs_with, DiffOptions};
pub use endpoints::{diff_endpoints, EndpointDiff};
pub use fields::diff_fields;
pub use renames::{infer_renames, RenameCandidate, RenameInference};
