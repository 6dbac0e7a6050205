//! Exclusivity Reconciler
//!
//! Phase A prunes every declared exclusive entry from working copies of
//! the aggregates. Phase B then requires each membership group to be
//! identical across its targets; anything left over is undeclared drift.

use std::collections::{BTreeMap, HashSet};

use crate::config::{Config, TargetExclusive};
use crate::error::{LockstepError, LockstepResult};
use crate::models::{sorted, Target, TargetIndex};
use crate::report::ValidationSink;

use super::diff::difference;

/// Reconcile every membership group against the frozen index.
///
/// The index itself is never touched; pruning happens on one owned working
/// map threaded through the loop.
pub fn reconcile(
    index: &TargetIndex,
    config: &Config,
    sink: &mut impl ValidationSink,
) -> LockstepResult<()> {
    let mut working: BTreeMap<String, Target> = index
        .iter()
        .map(|(name, model)| (name.clone(), Target::from(model)))
        .collect();

    for set in &config.file_membership_sets {
        for (target_name, exclusive) in &set.exclusive {
            let target = working.get(target_name).cloned().ok_or_else(|| {
                LockstepError::UnknownExclusiveTarget {
                    target: target_name.clone(),
                }
            })?;
            let pruned = prune_target(target, exclusive)?;
            working.insert(target_name.clone(), pruned);
        }
    }

    for set in &config.file_membership_sets {
        validate_residual(&working, &set.targets, sink)?;
    }

    Ok(())
}

/// Subtract every declared exclusive pattern from one working target.
///
/// Each pattern is matched against the already partially pruned sets; a
/// pattern that matches nothing means the declaration is stale and fails
/// right away.
fn prune_target(mut target: Target, exclusive: &TargetExclusive) -> LockstepResult<Target> {
    for pattern in &exclusive.files {
        let matched: HashSet<String> = target
            .file_paths
            .iter()
            .filter(|path| file_pattern_matches(pattern, path))
            .cloned()
            .collect();
        target = target.without_file_paths(&require_match(matched, &target.name, pattern)?);
    }

    for pattern in &exclusive.dependencies {
        let matched = match_named(&target.dependencies, pattern);
        target = target.without_dependencies(&require_match(matched, &target.name, pattern)?);
    }

    for pattern in &exclusive.frameworks {
        let matched = match_named(&target.frameworks, pattern);
        target = target.without_frameworks(&require_match(matched, &target.name, pattern)?);
    }

    Ok(target)
}

fn require_match(
    matched: HashSet<String>,
    target: &str,
    pattern: &str,
) -> LockstepResult<HashSet<String>> {
    if matched.is_empty() {
        return Err(LockstepError::ExclusiveEntryUnmatched {
            target: target.to_string(),
            pattern: pattern.to_string(),
        });
    }
    Ok(matched)
}

/// File patterns: a trailing `/*` or `/.*` matches every path containing
/// the directory prefix; anything else matches by plain substring.
pub fn file_pattern_matches(pattern: &str, path: &str) -> bool {
    let prefix = pattern
        .strip_suffix("/.*")
        .or_else(|| pattern.strip_suffix("/*"));
    match prefix {
        Some(dir) => path.contains(&format!("{dir}/")),
        None => path.contains(pattern),
    }
}

/// Dependency and framework patterns: exact name first, substring fallback.
pub fn match_named(set: &HashSet<String>, pattern: &str) -> HashSet<String> {
    if set.contains(pattern) {
        return std::iter::once(pattern.to_string()).collect();
    }
    set.iter()
        .filter(|value| value.contains(pattern))
        .cloned()
        .collect()
}

/// Phase B: after pruning, the group's targets must be identical per category.
fn validate_residual(
    working: &BTreeMap<String, Target>,
    group_targets: &[String],
    sink: &mut impl ValidationSink,
) -> LockstepResult<()> {
    let mut members: Vec<&Target> = Vec::with_capacity(group_targets.len());
    for name in group_targets {
        members.push(
            working
                .get(name)
                .ok_or_else(|| LockstepError::UnknownTarget {
                    target: name.clone(),
                    context: "membership set".to_string(),
                })?,
        );
    }

    let diff = difference(&members);
    if diff.is_empty() {
        return Ok(());
    }

    let files = sorted(&diff.files);
    let dependencies = sorted(&diff.dependencies);
    let frameworks = sorted(&diff.frameworks);

    if !files.is_empty() {
        sink.diagnostic(&format!("files out of sync: [{}]", files.join(", ")));
    }
    if !dependencies.is_empty() {
        sink.diagnostic(&format!(
            "dependencies out of sync: [{}]",
            dependencies.join(", ")
        ));
    }
    if !frameworks.is_empty() {
        sink.diagnostic(&format!("frameworks out of sync: [{}]", frameworks.join(", ")));
    }

    Err(LockstepError::ResidualDifference {
        targets: group_targets.to_vec(),
        files,
        dependencies,
        frameworks,
    })
}
