//! Property tests for exclusive-pattern matching and pruning.

use std::collections::HashSet;

use proptest::prelude::*;

use lockstep::membership::reconcile::{file_pattern_matches, match_named};

fn path() -> impl Strategy<Value = String> {
    let segment = proptest::string::string_regex("[A-Za-z0-9]{1,8}").unwrap();
    proptest::collection::vec(segment, 1..=4).prop_map(|segments| segments.join("/"))
}

fn paths() -> impl Strategy<Value = HashSet<String>> {
    proptest::collection::hash_set(path(), 0..=12)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `X/*` and `X/.*` are equivalent patterns, and both reduce
    /// to substring containment of `X/`.
    #[test]
    fn property_wildcard_forms_are_equivalent(prefix in "[A-Za-z0-9]{1,8}", path in path()) {
        let star = format!("{prefix}/*");
        let dot_star = format!("{prefix}/.*");

        prop_assert_eq!(
            file_pattern_matches(&star, &path),
            file_pattern_matches(&dot_star, &path)
        );
        prop_assert_eq!(
            file_pattern_matches(&star, &path),
            path.contains(&format!("{prefix}/"))
        );
    }

    /// PROPERTY: a non-wildcard pattern matches exactly by substring.
    #[test]
    fn property_plain_pattern_is_substring_containment(
        pattern in "[A-Za-z0-9]{1,8}",
        path in path(),
    ) {
        prop_assert_eq!(file_pattern_matches(&pattern, &path), path.contains(&pattern));
    }

    /// PROPERTY: subtracting a pattern's matches exhausts the pattern;
    /// nothing in the remainder still matches, so a second application
    /// changes nothing.
    #[test]
    fn property_file_pruning_is_idempotent(set in paths(), pattern in "[A-Za-z0-9]{1,8}") {
        let matched: HashSet<String> = set
            .iter()
            .filter(|p| file_pattern_matches(&pattern, p))
            .cloned()
            .collect();
        let remaining: HashSet<String> = set.difference(&matched).cloned().collect();

        prop_assert!(remaining.iter().all(|p| !file_pattern_matches(&pattern, p)));
    }

    /// PROPERTY: without an exact match in the set, named matching is
    /// exhausted by subtraction as well. With an exact match present only
    /// that one name is consumed and substring cousins survive.
    #[test]
    fn property_named_substring_pruning_is_idempotent(
        set in paths(),
        pattern in "[A-Za-z0-9]{1,8}",
    ) {
        prop_assume!(!set.contains(&pattern));
        let matched = match_named(&set, &pattern);
        let remaining: HashSet<String> = set.difference(&matched).cloned().collect();

        prop_assert!(match_named(&remaining, &pattern).is_empty());
    }

    /// PROPERTY: an exact name always wins over substring fallback.
    #[test]
    fn property_exact_name_wins(set in paths(), pattern in "[A-Za-z0-9]{1,8}") {
        let mut set = set;
        set.insert(pattern.clone());

        let matched = match_named(&set, &pattern);
        prop_assert_eq!(matched.len(), 1);
        prop_assert!(matched.contains(&pattern));
    }
}
