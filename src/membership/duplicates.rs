//! Duplicate Validator
//!
//! Verifies pairwise distinctness of a membership category. Unlike the
//! fail-fast checks elsewhere, a violation reports every offending value
//! at once, sorted and deduplicated.

use std::collections::{BTreeSet, HashSet};

use crate::error::{LockstepError, LockstepResult};

/// Verify that `values` contains no repeated entry (case-sensitive).
///
/// `context` is the category label carried into the error, e.g. `"Resource"`.
pub fn validate_distinct(values: &[String], context: &str, target: &str) -> LockstepResult<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(values.len());
    let mut offending: BTreeSet<String> = BTreeSet::new();

    for value in values {
        if !seen.insert(value) {
            offending.insert(value.clone());
        }
    }

    if offending.is_empty() {
        return Ok(());
    }

    Err(LockstepError::DuplicateEntries {
        target: target.to_string(),
        context: context.to_string(),
        values: offending.into_iter().collect(),
    })
}
