//! Catalog comparison: partition, field diff and rename inference combined.

use crate::differ::changes::{ChangeEntry, Changelog};
use crate::differ::fields::diff_fields;
use crate::differ::partition::partition;
use crate::differ::renames::infer_renames;
use crate::error::{DriftError, Result};
use crate::types::Catalog;

/// Similarity above which two differently named fields are the same field.
pub const DEFAULT_FIELD_RENAME_THRESHOLD: f64 = 0.8;

/// Combined score above which two differently named types are the same type.
pub const DEFAULT_TYPE_RENAME_THRESHOLD: f64 = 0.6;

/// Tunable thresholds for rename inference. Both comparisons are strict.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiffOptions {
    pub field_rename_threshold: f64,
    pub type_rename_threshold: f64,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            field_rename_threshold: DEFAULT_FIELD_RENAME_THRESHOLD,
            type_rename_threshold: DEFAULT_TYPE_RENAME_THRESHOLD,
        }
    }
}

impl DiffOptions {
    /// Build options, rejecting thresholds outside `[0, 1]`.
    pub fn new(field_rename_threshold: f64, type_rename_threshold: f64) -> Result<Self> {
        check_threshold("field rename", field_rename_threshold)?;
        check_threshold("type rename", type_rename_threshold)?;
        Ok(Self {
            field_rename_threshold,
            type_rename_threshold,
        })
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DriftError::InvalidThreshold { name, value })
    }
}

/// Compare two catalogs with the default thresholds.
pub fn compare_catalogs(old: &Catalog, new: &Catalog) -> Changelog {
    compare_catalogs_with(old, new, &DiffOptions::default())
}

/// Compare two catalogs.
///
/// Same-name types appear only when their fields changed. Inferred renames
/// always appear, even with identical fields, since the type name changed.
/// Inputs are never mutated and the result depends on nothing else.
pub fn compare_catalogs_with(old: &Catalog, new: &Catalog, options: &DiffOptions) -> Changelog {
    let mut changelog = Changelog::new();
    let parts = partition(old, new);

    for &name in &parts.matched {
        let old_fields = &old[name];
        let new_fields = &new[name];
        let diff = diff_fields(old_fields, new_fields, options.field_rename_threshold);
        if diff.has_changes() {
            changelog.insert(name, ChangeEntry::modified(new_fields, diff));
        }
    }

    let inference = infer_renames(
        old,
        new,
        &parts.old_only,
        &parts.new_only,
        options.type_rename_threshold,
    );

    for (&new_name, &old_name) in &inference.renames {
        let new_fields = &new[new_name];
        let diff = diff_fields(&old[old_name], new_fields, options.field_rename_threshold);
        changelog.insert(new_name, ChangeEntry::renamed(old_name, new_fields, diff));
    }

    for &name in &inference.new_only {
        changelog.insert(name, ChangeEntry::added(&new[name]));
    }

    for &name in &inference.old_only {
        changelog.insert(name, ChangeEntry::removed(&old[name]));
    }

    tracing::debug!(
        matched = parts.matched.len(),
        renamed = inference.renames.len(),
        added = inference.new_only.len(),
        removed = inference.old_only.len(),
        "compared catalogs"
    );

    changelog
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differ::changes::{ChangeStatus, ChangedTypeField, RenamedField};
    use crate::types::FieldMap;
    use std::collections::BTreeSet;

    fn fields(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn catalog(types: &[(&str, &[(&str, &str)])]) -> Catalog {
        types
            .iter()
            .map(|(name, f)| (name.to_string(), fields(f)))
            .collect()
    }

    #[test]
    fn test_identical_catalogs_yield_empty_changelog() {
        let old = catalog(&[("User", &[("name", "string")])]);
        let changelog = compare_catalogs(&old, &old.clone());

        assert!(changelog.is_empty());
        assert_eq!(changelog.summary.text(), "No changes");
    }

    #[test]
    fn test_empty_catalogs() {
        assert!(compare_catalogs(&Catalog::new(), &Catalog::new()).is_empty());
    }

    #[test]
    fn test_dissimilar_field_names_modify_type() {
        let old = catalog(&[("User", &[("name", "string")])]);
        let new = catalog(&[("User", &[("fullName", "string")])]);

        let changelog = compare_catalogs(&old, &new);
        let entry = changelog.get("User").unwrap();

        assert_eq!(entry.status, ChangeStatus::Modified);
        assert!(entry.renamed_fields.is_empty());
        assert_eq!(entry.added_fields, fields(&[("fullName", "string")]));
        assert_eq!(entry.removed_fields, fields(&[("name", "string")]));
        assert_eq!(entry.fields, fields(&[("fullName", "string")]));
    }

    #[test]
    fn test_similar_field_name_is_renamed_field() {
        let old = catalog(&[("User", &[("emailAddress", "string")])]);
        let new = catalog(&[("User", &[("emailAddresses", "string[]")])]);

        let changelog = compare_catalogs(&old, &new);
        let entry = changelog.get("User").unwrap();

        assert_eq!(entry.status, ChangeStatus::Modified);
        assert_eq!(
            entry.renamed_fields,
            vec![RenamedField {
                old_name: "emailAddress".to_string(),
                new_name: "emailAddresses".to_string(),
                old_type: "string".to_string(),
                new_type: "string[]".to_string(),
            }]
        );
        assert!(entry.added_fields.is_empty());
        assert!(entry.removed_fields.is_empty());
    }

    #[test]
    fn test_pure_type_rename_is_recorded() {
        let old = catalog(&[("Customer", &[("id", "int"), ("email", "string")])]);
        let new = catalog(&[("Client", &[("id", "int"), ("email", "string")])]);

        let changelog = compare_catalogs(&old, &new);
        let entry = changelog.get("Client").unwrap();

        assert_eq!(changelog.len(), 1);
        assert_eq!(entry.status, ChangeStatus::Renamed);
        assert_eq!(entry.old_name.as_deref(), Some("Customer"));
        assert!(entry.added_fields.is_empty());
        assert!(entry.removed_fields.is_empty());
        assert!(entry.renamed_fields.is_empty());
        assert!(entry.changed_type_fields.is_empty());
        assert_eq!(entry.unchanged_fields.len(), 2);
    }

    #[test]
    fn test_added_type() {
        let old = Catalog::new();
        let new = catalog(&[("Order", &[("id", "int")])]);

        let changelog = compare_catalogs(&old, &new);
        let entry = changelog.get("Order").unwrap();

        assert_eq!(entry.status, ChangeStatus::Added);
        assert_eq!(entry.added_fields, fields(&[("id", "int")]));
    }

    #[test]
    fn test_removed_type() {
        let old = catalog(&[("Order", &[("id", "int")])]);
        let new = Catalog::new();

        let changelog = compare_catalogs(&old, &new);
        let entry = changelog.get("Order").unwrap();

        assert_eq!(entry.status, ChangeStatus::Removed);
        assert_eq!(entry.removed_fields, fields(&[("id", "int")]));
    }

    #[test]
    fn test_field_type_change() {
        let old = catalog(&[("Person", &[("age", "int")])]);
        let new = catalog(&[("Person", &[("age", "string")])]);

        let changelog = compare_catalogs(&old, &new);
        let entry = changelog.get("Person").unwrap();

        assert_eq!(
            entry.changed_type_fields,
            vec![ChangedTypeField {
                name: "age".to_string(),
                old_type: "int".to_string(),
                new_type: "string".to_string(),
            }]
        );
        assert!(entry.added_fields.is_empty());
        assert!(entry.removed_fields.is_empty());
        assert!(entry.renamed_fields.is_empty());
    }

    #[test]
    fn test_renamed_type_carries_field_changes() {
        let old = catalog(&[(
            "CaseEntity",
            &[("id", "Long"), ("status", "String"), ("notes", "String")],
        )]);
        let new = catalog(&[(
            "CaseEntry",
            &[("id", "Long"), ("status", "Status"), ("note", "String")],
        )]);

        let changelog = compare_catalogs(&old, &new);
        let entry = changelog.get("CaseEntry").unwrap();

        assert_eq!(entry.status, ChangeStatus::Renamed);
        assert_eq!(entry.old_name.as_deref(), Some("CaseEntity"));
        assert_eq!(entry.renamed_fields.len(), 1);
        assert_eq!(entry.renamed_fields[0].old_name, "notes");
        assert_eq!(entry.changed_type_fields.len(), 1);
        assert!(changelog.get("CaseEntity").is_none());
    }

    #[test]
    fn test_every_type_lands_in_one_bucket() {
        let old = catalog(&[
            ("User", &[("id", "int"), ("name", "string")]),
            ("Stable", &[("id", "int")]),
            ("Customer", &[("id", "int"), ("email", "string")]),
            ("Legacy", &[("flag", "bool")]),
        ]);
        let new = catalog(&[
            ("User", &[("id", "long"), ("name", "string")]),
            ("Stable", &[("id", "int")]),
            ("Client", &[("id", "int"), ("email", "string")]),
            ("Shipment", &[("tracking", "string"), ("carrier", "string")]),
        ]);

        let changelog = compare_catalogs(&old, &new);

        assert_eq!(changelog.get("User").unwrap().status, ChangeStatus::Modified);
        assert!(changelog.get("Stable").is_none());
        assert_eq!(changelog.get("Client").unwrap().status, ChangeStatus::Renamed);
        assert_eq!(changelog.get("Shipment").unwrap().status, ChangeStatus::Added);
        assert_eq!(changelog.get("Legacy").unwrap().status, ChangeStatus::Removed);

        // Every old name is accounted for exactly once
        let mut old_seen: BTreeSet<&str> = BTreeSet::new();
        for (name, entry) in changelog.iter() {
            let old_name = match entry.status {
                ChangeStatus::Added => continue,
                ChangeStatus::Renamed => entry.old_name.as_deref().unwrap(),
                _ => name.as_str(),
            };
            assert!(old_seen.insert(old_name));
        }
        old_seen.insert("Stable");
        let old_names: BTreeSet<&str> = old.keys().map(String::as_str).collect();
        assert_eq!(old_seen, old_names);

        assert_eq!(changelog.summary.total(), 4);
    }

    #[test]
    fn test_compare_is_deterministic() {
        let old = catalog(&[
            ("Item", &[("sku", "string")]),
            ("Note", &[("body", "string")]),
        ]);
        let new = catalog(&[
            ("ItemA", &[("sku", "string")]),
            ("ItemB", &[("sku", "string")]),
            ("Notes", &[("body", "string")]),
        ]);

        let first = compare_catalogs(&old, &new);
        for _ in 0..5 {
            assert_eq!(compare_catalogs(&old, &new), first);
        }
        assert_eq!(first.get("ItemA").unwrap().status, ChangeStatus::Renamed);
        assert_eq!(first.get("ItemB").unwrap().status, ChangeStatus::Added);
    }

    #[test]
    fn test_custom_thresholds() {
        let old = catalog(&[("User", &[("name", "string")])]);
        let new = catalog(&[("User", &[("fullName", "string")])]);

        let options = DiffOptions::new(0.4, 0.6).unwrap();
        let changelog = compare_catalogs_with(&old, &new, &options);

        assert_eq!(changelog.get("User").unwrap().renamed_fields.len(), 1);
    }

    #[test]
    fn test_diff_options_rejects_out_of_range() {
        assert!(DiffOptions::new(1.2, 0.6).is_err());
        assert!(DiffOptions::new(0.8, -0.1).is_err());
        assert_eq!(DiffOptions::new(0.8, 0.6).unwrap(), DiffOptions::default());
    }
}
