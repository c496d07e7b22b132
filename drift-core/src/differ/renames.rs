//! Cross-catalog rename inference for types without an exact name match.
//!
//! Scoring and assignment are separate phases: every (new, old) pair is scored
//! up front, the list is sorted, and pairs are then consumed greedily. The
//! greedy walk is not an optimal bipartite matching.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::differ::similarity::{jaccard_similarity, name_similarity};
use crate::types::Catalog;

/// Similarity scores for one unmatched (new, old) type pair.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenameCandidate<'a> {
    pub new_name: &'a str,
    pub old_name: &'a str,
    pub name_similarity: f64,
    pub fields_similarity: f64,
    pub combined: f64,
}

/// Outcome of rename inference.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenameInference<'a> {
    /// New type name to the old type it was renamed from
    pub renames: BTreeMap<&'a str, &'a str>,
    /// New-only types left unmatched (genuinely added)
    pub new_only: BTreeSet<&'a str>,
    /// Old-only types left unmatched (genuinely removed)
    pub old_only: BTreeSet<&'a str>,
}

/// Score every pair in `new_only × old_only`.
///
/// Sorted by combined score descending, then new name, then old name, so
/// equal scores always resolve the same way.
pub fn score_candidates<'a>(
    old: &'a Catalog,
    new: &'a Catalog,
    old_only: &BTreeSet<&'a str>,
    new_only: &BTreeSet<&'a str>,
) -> Vec<RenameCandidate<'a>> {
    let mut candidates = Vec::with_capacity(old_only.len() * new_only.len());

    for &new_name in new_only {
        let new_fields = &new[new_name];
        for &old_name in old_only {
            let old_fields = &old[old_name];

            let name_sim = name_similarity(new_name, old_name);
            let fields_sim = jaccard_similarity(new_fields.keys(), old_fields.keys());

            candidates.push(RenameCandidate {
                new_name,
                old_name,
                name_similarity: name_sim,
                fields_similarity: fields_sim,
                combined: (name_sim + fields_sim) / 2.0,
            });
        }
    }

    candidates.sort_by(|a, b| {
        b.combined
            .partial_cmp(&a.combined)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.new_name.cmp(b.new_name))
            .then_with(|| a.old_name.cmp(b.old_name))
    });
    candidates
}

/// Greedily accept candidates scoring strictly above `threshold`.
///
/// `candidates` must already be in score order; each type on either side is
/// consumed by at most one accepted pair.
pub fn assign_renames<'a>(
    candidates: &[RenameCandidate<'a>],
    old_only: &BTreeSet<&'a str>,
    new_only: &BTreeSet<&'a str>,
    threshold: f64,
) -> RenameInference<'a> {
    let mut inference = RenameInference {
        renames: BTreeMap::new(),
        new_only: new_only.clone(),
        old_only: old_only.clone(),
    };

    for candidate in candidates {
        if candidate.combined <= threshold {
            // Sorted descending: nothing further can clear the bar
            break;
        }
        if !inference.new_only.contains(candidate.new_name)
            || !inference.old_only.contains(candidate.old_name)
        {
            continue;
        }

        tracing::debug!(
            new = candidate.new_name,
            old = candidate.old_name,
            score = candidate.combined,
            "inferred type rename"
        );
        inference.new_only.remove(candidate.new_name);
        inference.old_only.remove(candidate.old_name);
        inference
            .renames
            .insert(candidate.new_name, candidate.old_name);
    }

    inference
}

/// Score and assign renames between the unmatched types of two catalogs.
pub fn infer_renames<'a>(
    old: &'a Catalog,
    new: &'a Catalog,
    old_only: &BTreeSet<&'a str>,
    new_only: &BTreeSet<&'a str>,
    threshold: f64,
) -> RenameInference<'a> {
    let candidates = score_candidates(old, new, old_only, new_only);
    assign_renames(&candidates, old_only, new_only, threshold)
}
