//! Change types and result structures for catalog diffs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::FieldMap;

/// Kind of change recorded for a type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Added,
    Removed,
    Modified,
    Renamed,
}

impl ChangeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeStatus::Added => "added",
            ChangeStatus::Removed => "removed",
            ChangeStatus::Modified => "modified",
            ChangeStatus::Renamed => "renamed",
        }
    }
}

impl std::fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field that kept its identity under a new name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamedField {
    pub old_name: String,
    pub new_name: String,
    pub old_type: String,
    pub new_type: String,
}

/// A field present on both sides whose type label differs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedTypeField {
    pub name: String,
    pub old_type: String,
    pub new_type: String,
}

/// Field-level comparison of one matched type pair.
///
/// Every field of the old map lands in exactly one of `removed`,
/// `renamed` (old side), `changed_type` or `unchanged`; likewise for the new
/// map with `added` in place of `removed`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDiff {
    pub added: FieldMap,
    pub removed: FieldMap,
    pub renamed: Vec<RenamedField>,
    pub changed_type: Vec<ChangedTypeField>,
    pub unchanged: FieldMap,
}

impl FieldDiff {
    /// True when any field was added, removed, renamed or retyped.
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty()
            || !self.removed.is_empty()
            || !self.renamed.is_empty()
            || !self.changed_type.is_empty()
    }
}

/// The changelog record for one type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
    pub status: ChangeStatus,

    /// Previous type name, set for renamed types only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_name: Option<String>,

    /// New-side field map (old-side when removed)
    pub fields: FieldMap,

    pub added_fields: FieldMap,
    pub removed_fields: FieldMap,
    pub unchanged_fields: FieldMap,
    pub renamed_fields: Vec<RenamedField>,
    pub changed_type_fields: Vec<ChangedTypeField>,
}

impl ChangeEntry {
    /// A type that only exists on the new side. All of its fields are added.
    pub fn added(fields: &FieldMap) -> Self {
        Self {
            status: ChangeStatus::Added,
            old_name: None,
            fields: fields.clone(),
            added_fields: fields.clone(),
            removed_fields: FieldMap::new(),
            unchanged_fields: FieldMap::new(),
            renamed_fields: Vec::new(),
            changed_type_fields: Vec::new(),
        }
    }

    /// A type that only exists on the old side. All of its fields are removed.
    pub fn removed(fields: &FieldMap) -> Self {
        Self {
            status: ChangeStatus::Removed,
            old_name: None,
            fields: fields.clone(),
            added_fields: FieldMap::new(),
            removed_fields: fields.clone(),
            unchanged_fields: FieldMap::new(),
            renamed_fields: Vec::new(),
            changed_type_fields: Vec::new(),
        }
    }

    /// A same-name type whose fields changed.
    pub fn modified(new_fields: &FieldMap, diff: FieldDiff) -> Self {
        Self::from_diff(ChangeStatus::Modified, None, new_fields, diff)
    }

    /// A type matched to `old_name` by similarity.
    pub fn renamed(old_name: &str, new_fields: &FieldMap, diff: FieldDiff) -> Self {
        Self::from_diff(
            ChangeStatus::Renamed,
            Some(old_name.to_string()),
            new_fields,
            diff,
        )
    }

    fn from_diff(
        status: ChangeStatus,
        old_name: Option<String>,
        new_fields: &FieldMap,
        diff: FieldDiff,
    ) -> Self {
        Self {
            status,
            old_name,
            fields: new_fields.clone(),
            added_fields: diff.added,
            removed_fields: diff.removed,
            unchanged_fields: diff.unchanged,
            renamed_fields: diff.renamed,
            changed_type_fields: diff.changed_type,
        }
    }
}

/// Summary statistics for a changelog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogSummary {
    pub types_added: u32,
    pub types_removed: u32,
    pub types_modified: u32,
    pub types_renamed: u32,

    pub fields_added: u32,
    pub fields_removed: u32,
    pub fields_renamed: u32,
    pub fields_retyped: u32,
}

impl ChangelogSummary {
    /// Increment counters for one entry.
    ///
    /// Field counters only track matched pairs; the fields of wholly added or
    /// removed types are implied by the type counters.
    pub fn record(&mut self, entry: &ChangeEntry) {
        self.apply(entry, |count, n| *count += n);
    }

    /// Undo [`record`](Self::record) for an entry that is being replaced.
    pub fn forget(&mut self, entry: &ChangeEntry) {
        self.apply(entry, |count, n| *count = count.saturating_sub(n));
    }

    fn apply(&mut self, entry: &ChangeEntry, op: impl Fn(&mut u32, u32)) {
        match entry.status {
            ChangeStatus::Added => op(&mut self.types_added, 1),
            ChangeStatus::Removed => op(&mut self.types_removed, 1),
            ChangeStatus::Modified | ChangeStatus::Renamed => {
                if entry.status == ChangeStatus::Modified {
                    op(&mut self.types_modified, 1);
                } else {
                    op(&mut self.types_renamed, 1);
                }
                op(&mut self.fields_added, entry.added_fields.len() as u32);
                op(&mut self.fields_removed, entry.removed_fields.len() as u32);
                op(&mut self.fields_renamed, entry.renamed_fields.len() as u32);
                op(&mut self.fields_retyped, entry.changed_type_fields.len() as u32);
            }
        }
    }

    /// Total number of changed types.
    pub fn total(&self) -> u32 {
        self.types_added + self.types_removed + self.types_modified + self.types_renamed
    }

    /// Generate human-readable summary string.
    pub fn text(&self) -> String {
        let mut parts = Vec::new();

        let mut type_parts = Vec::new();
        for (count, label) in [
            (self.types_added, "added"),
            (self.types_removed, "removed"),
            (self.types_modified, "modified"),
            (self.types_renamed, "renamed"),
        ] {
            if count > 0 {
                type_parts.push(format!("{} {}", count, label));
            }
        }
        if !type_parts.is_empty() {
            parts.push(format!("types: {}", type_parts.join(", ")));
        }

        let mut field_parts = Vec::new();
        for (count, label) in [
            (self.fields_added, "added"),
            (self.fields_removed, "removed"),
            (self.fields_renamed, "renamed"),
            (self.fields_retyped, "retyped"),
        ] {
            if count > 0 {
                field_parts.push(format!("{} {}", count, label));
            }
        }
        if !field_parts.is_empty() {
            parts.push(format!("fields: {}", field_parts.join(", ")));
        }

        if parts.is_empty() {
            "No changes".to_string()
        } else {
            parts.join("; ")
        }
    }
}

/// Complete result of a catalog comparison.
///
/// Keyed by the new-side type name, or the old-side name for removed types.
/// Unchanged types are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelog {
    pub entries: BTreeMap<String, ChangeEntry>,
    pub summary: ChangelogSummary,
}

impl Changelog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry and update the summary.
    ///
    /// An entry already stored under `name` is replaced and its counts are
    /// taken back out of the summary.
    pub fn insert(&mut self, name: impl Into<String>, entry: ChangeEntry) {
        self.summary.record(&entry);
        if let Some(previous) = self.entries.insert(name.into(), entry) {
            self.summary.forget(&previous);
        }
    }

    pub fn get(&self, name: &str) -> Option<&ChangeEntry> {
        self.entries.get(name)
    }

    /// Check if there are any changes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ChangeEntry)> {
        self.entries.iter()
    }

    /// Entries with the given status, in name order.
    pub fn with_status(&self, status: ChangeStatus) -> Vec<(&str, &ChangeEntry)> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.status == status)
            .map(|(name, entry)| (name.as_str(), entry))
            .collect()
    }
}
