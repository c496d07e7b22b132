//! Added and removed API endpoints, grouped by tag.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::types::{Endpoint, EndpointCatalog};

/// Endpoints that appeared or disappeared between two revisions.
///
/// An endpoint filed under several tags is listed under each of them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EndpointDiff {
    pub added: BTreeMap<String, Vec<Endpoint>>,
    pub removed: BTreeMap<String, Vec<Endpoint>>,
}

impl EndpointDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Every tag with at least one added or removed endpoint, sorted.
    pub fn tags(&self) -> BTreeSet<&str> {
        self.added
            .keys()
            .chain(self.removed.keys())
            .map(String::as_str)
            .collect()
    }

    pub fn added_count(&self) -> usize {
        self.added.values().map(Vec::len).sum()
    }

    pub fn removed_count(&self) -> usize {
        self.removed.values().map(Vec::len).sum()
    }
}

/// Compare the endpoint sets of two revisions.
///
/// Endpoints are identified by path and method only; tag changes on a
/// surviving endpoint are not reported.
pub fn diff_endpoints(old: &EndpointCatalog, new: &EndpointCatalog) -> EndpointDiff {
    EndpointDiff {
        added: group_missing(new, old),
        removed: group_missing(old, new),
    }
}

/// Endpoints of `from` absent in `other`, grouped by their tags in `from`.
fn group_missing(from: &EndpointCatalog, other: &EndpointCatalog) -> BTreeMap<String, Vec<Endpoint>> {
    let mut grouped: BTreeMap<String, Vec<Endpoint>> = BTreeMap::new();

    // `from` iterates in path-then-method order, so each group stays sorted
    for (endpoint, tags) in from {
        if other.contains_key(endpoint) {
            continue;
        }
        for tag in tags {
            grouped
                .entry(tag.clone())
                .or_default()
                .push(endpoint.clone());
        }
    }

    grouped
}
