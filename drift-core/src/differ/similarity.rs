//! String and field-set similarity metrics.

use std::collections::BTreeSet;

use similar::{Algorithm, ChangeTag, TextDiff};

/// Normalized similarity of two names, in `[0, 1]`.
///
/// Computed as `2 * M / (len(a) + len(b))` where `M` is the number of
/// characters kept by a Myers character diff, i.e. the longest common
/// subsequence. Lengths count chars, not bytes. Two empty strings are
/// identical and score 1.0.
pub fn name_similarity(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 1.0;
    }

    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_chars(a, b);

    let matches = diff
        .iter_all_changes()
        .filter(|change| change.tag() == ChangeTag::Equal)
        .map(|change| change.value().chars().count())
        .sum::<usize>();

    2.0 * matches as f64 / total as f64
}

/// Jaccard similarity of two key sets: `|a ∩ b| / |a ∪ b|`.
///
/// Two empty sets are considered identical.
pub fn jaccard_similarity<'a, A, B>(a: A, b: B) -> f64
where
    A: IntoIterator<Item = &'a String>,
    B: IntoIterator<Item = &'a String>,
{
    let a: BTreeSet<&str> = a.into_iter().map(String::as_str).collect();
    let b: BTreeSet<&str> = b.into_iter().map(String::as_str).collect();

    let union = a.union(&b).count();
    if union == 0 {
        return 1.0;
    }
    let intersection = a.intersection(&b).count();

    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_identical_names_score_one() {
        assert_eq!(name_similarity("email", "email"), 1.0);
        assert_eq!(name_similarity("", ""), 1.0);
    }

    #[test]
    fn test_disjoint_names_score_zero() {
        assert_eq!(name_similarity("abc", "xyz"), 0.0);
        assert_eq!(name_similarity("abc", ""), 0.0);
    }

    #[test]
    fn test_name_similarity_ratio() {
        // "ame" is the longest common subsequence: 2 * 3 / 12
        assert_eq!(name_similarity("name", "fullName"), 0.5);
        // "Ct": 2 * 2 / 14
        assert_eq!(name_similarity("Customer", "Client"), 4.0 / 14.0);
        // "abcd": 2 * 4 / 10
        assert_eq!(name_similarity("abcde", "abcdf"), 0.8);
    }

    #[test]
    fn test_name_similarity_is_symmetric() {
        for (a, b) in [
            ("userName", "username"),
            ("createdAt", "creationDate"),
            ("Customer", "Client"),
        ] {
            assert_eq!(name_similarity(a, b), name_similarity(b, a));
        }
    }

    #[test]
    fn test_name_similarity_counts_chars_not_bytes() {
        // One shared char out of two on each side
        assert_eq!(name_similarity("ñx", "ñy"), 0.5);
    }

    #[test]
    fn test_jaccard_similarity() {
        let a = keys(&["id", "email", "name"]);
        let b = keys(&["id", "email", "phone"]);
        assert_eq!(jaccard_similarity(&a, &b), 0.5);
    }

    #[test]
    fn test_jaccard_both_empty_is_one() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(jaccard_similarity(&empty, &empty), 1.0);
    }

    #[test]
    fn test_jaccard_one_empty_is_zero() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(jaccard_similarity(&empty, &keys(&["id"])), 0.0);
    }
}
