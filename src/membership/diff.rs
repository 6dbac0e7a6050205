//! Diff Engine
//!
//! Pure set-difference utility over target aggregates: per category, the
//! elements that are not shared by every aggregate (union minus
//! intersection).

use std::collections::HashSet;

use crate::models::Target;

/// Per-category result of a membership diff.
///
/// Sets carry no ordering; callers sort before display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipDiff {
    /// File paths not present in every aggregate
    pub files: HashSet<String>,
    /// Dependencies not present in every aggregate
    pub dependencies: HashSet<String>,
    /// Frameworks not present in every aggregate
    pub frameworks: HashSet<String>,
}

impl MembershipDiff {
    /// True when all three categories are empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dependencies.is_empty() && self.frameworks.is_empty()
    }
}

/// Compute the membership difference across aggregates.
///
/// For fewer than two aggregates every category is empty: a lone target
/// cannot drift from itself.
pub fn difference(aggregates: &[&Target]) -> MembershipDiff {
    if aggregates.len() < 2 {
        return MembershipDiff::default();
    }

    MembershipDiff {
        files: category_difference(aggregates.iter().map(|t| &t.file_paths)),
        dependencies: category_difference(aggregates.iter().map(|t| &t.dependencies)),
        frameworks: category_difference(aggregates.iter().map(|t| &t.frameworks)),
    }
}

fn category_difference<'a>(
    sets: impl Iterator<Item = &'a HashSet<String>> + Clone,
) -> HashSet<String> {
    let union: HashSet<String> = sets.clone().flatten().cloned().collect();
    let intersection = sets.fold(None::<HashSet<String>>, |acc, set| match acc {
        None => Some(set.clone()),
        Some(acc) => Some(acc.intersection(set).cloned().collect()),
    });

    match intersection {
        Some(intersection) => union.difference(&intersection).cloned().collect(),
        None => HashSet::new(),
    }
}
