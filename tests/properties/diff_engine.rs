//! Property tests for the membership diff engine.

use std::collections::HashSet;

use proptest::prelude::*;

use lockstep::membership::difference;
use lockstep::Target;

fn name_set() -> impl Strategy<Value = HashSet<String>> {
    let name = proptest::string::string_regex("[a-e][0-9]{0,2}").unwrap();
    proptest::collection::hash_set(name, 0..=8)
}

fn targets() -> impl Strategy<Value = Vec<Target>> {
    let target = (name_set(), name_set(), name_set()).prop_map(|(files, deps, frameworks)| {
        Target {
            name: "t".to_string(),
            file_paths: files,
            dependencies: deps,
            frameworks,
        }
    });
    proptest::collection::vec(target, 1..=4)
}

fn union_of<'a>(sets: impl Iterator<Item = &'a HashSet<String>>) -> HashSet<String> {
    sets.flatten().cloned().collect()
}

fn intersection_of<'a>(
    mut sets: impl Iterator<Item = &'a HashSet<String>>,
) -> HashSet<String> {
    let first = match sets.next() {
        Some(set) => set.clone(),
        None => return HashSet::new(),
    };
    sets.fold(first, |acc, set| acc.intersection(set).cloned().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: per category, diff and intersection partition the union:
    /// their union is the union of all aggregates and they never overlap.
    #[test]
    fn property_diff_and_intersection_partition_union(targets in targets()) {
        prop_assume!(targets.len() >= 2);
        let refs: Vec<&Target> = targets.iter().collect();
        let diff = difference(&refs);

        let categories: [(&HashSet<String>, Vec<&HashSet<String>>); 3] = [
            (&diff.files, targets.iter().map(|t| &t.file_paths).collect()),
            (&diff.dependencies, targets.iter().map(|t| &t.dependencies).collect()),
            (&diff.frameworks, targets.iter().map(|t| &t.frameworks).collect()),
        ];

        for (diff_set, sets) in categories {
            let union = union_of(sets.iter().copied());
            let intersection = intersection_of(sets.iter().copied());

            let recombined: HashSet<String> =
                diff_set.union(&intersection).cloned().collect();
            prop_assert_eq!(&recombined, &union);
            prop_assert!(diff_set.is_disjoint(&intersection));
        }
    }

    /// PROPERTY: fewer than two aggregates never produce a difference.
    #[test]
    fn property_single_aggregate_has_empty_diff(files in name_set(), deps in name_set()) {
        let target = Target {
            name: "solo".to_string(),
            file_paths: files,
            dependencies: deps,
            frameworks: HashSet::new(),
        };
        prop_assert!(difference(&[&target]).is_empty());
        prop_assert!(difference(&[]).is_empty());
    }

    /// PROPERTY: the diff of identical aggregates is empty.
    #[test]
    fn property_identical_aggregates_do_not_drift(
        files in name_set(),
        deps in name_set(),
        copies in 2usize..=4,
    ) {
        let targets: Vec<Target> = (0..copies)
            .map(|i| Target {
                name: format!("t{i}"),
                file_paths: files.clone(),
                dependencies: deps.clone(),
                frameworks: HashSet::new(),
            })
            .collect();
        let refs: Vec<&Target> = targets.iter().collect();
        prop_assert!(difference(&refs).is_empty());
    }

    /// PROPERTY: difference is order-independent.
    #[test]
    fn property_difference_is_order_independent(targets in targets()) {
        prop_assume!(targets.len() >= 2);
        let forward: Vec<&Target> = targets.iter().collect();
        let reversed: Vec<&Target> = targets.iter().rev().collect();
        prop_assert_eq!(difference(&forward), difference(&reversed));
    }
}
