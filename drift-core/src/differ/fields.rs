//! Field-level comparison of a matched type pair.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::differ::changes::{ChangedTypeField, FieldDiff, RenamedField};
use crate::differ::similarity::name_similarity;
use crate::types::FieldMap;

/// Similarity of one (new-only, old-only) field pair.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldCandidate<'a> {
    pub new_name: &'a str,
    pub old_name: &'a str,
    pub score: f64,
}

/// Score every pair in `added × removed`.
///
/// Sorted by score descending, then new name, then old name, so equal scores
/// always resolve the same way.
pub fn field_candidates<'a>(
    added: &BTreeSet<&'a str>,
    removed: &BTreeSet<&'a str>,
) -> Vec<FieldCandidate<'a>> {
    let mut candidates = Vec::with_capacity(added.len() * removed.len());
    for &new_name in added {
        for &old_name in removed {
            candidates.push(FieldCandidate {
                new_name,
                old_name,
                score: name_similarity(new_name, old_name),
            });
        }
    }

    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.new_name.cmp(b.new_name))
            .then_with(|| a.old_name.cmp(b.old_name))
    });
    candidates
}

/// Compare two field maps.
///
/// Rename detection only pairs new-only with old-only fields. Pairs are taken
/// greedily in score order while the score is strictly above
/// `rename_threshold`, skipping pairs where either field is already renamed.
/// Both labels of a renamed field come from the original maps.
pub fn diff_fields(old: &FieldMap, new: &FieldMap, rename_threshold: f64) -> FieldDiff {
    let old_names: BTreeSet<&str> = old.keys().map(String::as_str).collect();
    let new_names: BTreeSet<&str> = new.keys().map(String::as_str).collect();

    let mut added: BTreeSet<&str> = new_names.difference(&old_names).copied().collect();
    let mut removed: BTreeSet<&str> = old_names.difference(&new_names).copied().collect();

    let mut renamed = Vec::new();
    for candidate in field_candidates(&added, &removed) {
        if candidate.score <= rename_threshold {
            break;
        }
        if !added.contains(candidate.new_name) || !removed.contains(candidate.old_name) {
            continue;
        }
        removed.remove(candidate.old_name);
        added.remove(candidate.new_name);

        renamed.push(RenamedField {
            old_name: candidate.old_name.to_string(),
            new_name: candidate.new_name.to_string(),
            old_type: old[candidate.old_name].clone(),
            new_type: new[candidate.new_name].clone(),
        });
    }

    let mut diff = FieldDiff {
        added: added
            .into_iter()
            .map(|name| (name.to_string(), new[name].clone()))
            .collect(),
        removed: removed
            .into_iter()
            .map(|name| (name.to_string(), old[name].clone()))
            .collect(),
        renamed,
        ..Default::default()
    };

    for name in old_names.intersection(&new_names) {
        let old_type = &old[*name];
        let new_type = &new[*name];
        if old_type != new_type {
            diff.changed_type.push(ChangedTypeField {
                name: (*name).to_string(),
                old_type: old_type.clone(),
                new_type: new_type.clone(),
            });
        } else {
            diff.unchanged.insert((*name).to_string(), new_type.clone());
        }
    }

    diff
}
