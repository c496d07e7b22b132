//! Exact-name partitioning of two catalogs.

use std::collections::BTreeSet;

use crate::types::Catalog;

/// Type names split by whether they appear on both sides.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition<'a> {
    pub matched: BTreeSet<&'a str>,
    pub old_only: BTreeSet<&'a str>,
    pub new_only: BTreeSet<&'a str>,
}

/// Split the type names of `old` and `new` into three disjoint sets.
pub fn partition<'a>(old: &'a Catalog, new: &'a Catalog) -> Partition<'a> {
    let old_names: BTreeSet<&str> = old.keys().map(String::as_str).collect();
    let new_names: BTreeSet<&str> = new.keys().map(String::as_str).collect();

    Partition {
        matched: old_names.intersection(&new_names).copied().collect(),
        old_only: old_names.difference(&new_names).copied().collect(),
        new_only: new_names.difference(&old_names).copied().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldMap;

    fn catalog(names: &[&str]) -> Catalog {
        names
            .iter()
            .map(|name| (name.to_string(), FieldMap::new()))
            .collect()
    }

    #[test]
    fn test_partition_disjoint_sets() {
        let old = catalog(&["User", "Order", "Legacy"]);
        let new = catalog(&["User", "Order", "Invoice"]);

        let parts = partition(&old, &new);

        assert_eq!(parts.matched, BTreeSet::from(["Order", "User"]));
        assert_eq!(parts.old_only, BTreeSet::from(["Legacy"]));
        assert_eq!(parts.new_only, BTreeSet::from(["Invoice"]));
    }

    #[test]
    fn test_partition_empty_catalogs() {
        let (old, new) = (Catalog::new(), Catalog::new());
        let parts = partition(&old, &new);
        assert_eq!(parts, Partition::default());
    }

    #[test]
    fn test_partition_covers_every_name_once() {
        let old = catalog(&["A", "B", "C"]);
        let new = catalog(&["B", "C", "D", "E"]);
        let parts = partition(&old, &new);

        let total = parts.matched.len() * 2 + parts.old_only.len() + parts.new_only.len();
        assert_eq!(total, old.len() + new.len());
    }
}
