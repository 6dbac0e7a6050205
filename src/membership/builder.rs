//! TargetModel Builder
//!
//! Turns the raw project snapshot into the frozen per-target aggregate
//! index. Duplicate validation runs here, per target, before any
//! synchronized-group buildable files are merged in; buildable files are
//! never duplicate-checked.

use std::collections::{BTreeMap, HashSet};

use crate::config::Config;
use crate::error::{LockstepError, LockstepResult};
use crate::fs::{path_string, GroupWalker};
use crate::models::{ProductType, TargetIndex, TargetModel};
use crate::project::{ExceptionKind, ProjectSnapshot, SyncedGroup};
use crate::report::ValidationSink;

use super::duplicates::validate_distinct;

/// Build the aggregate index from a project snapshot.
///
/// Emits one progress line per target and one diagnostic line per
/// synchronized group and per exception, in processing order.
pub fn build_target_index(
    snapshot: &ProjectSnapshot,
    config: &Config,
    walker: &impl GroupWalker,
    sink: &mut impl ValidationSink,
) -> LockstepResult<TargetIndex> {
    let mut index = TargetIndex::new();

    for raw in &snapshot.targets {
        sink.progress(&format!("parsed target '{}'", raw.name));

        if !config.is_duplicates_excluded(&raw.name) {
            validate_distinct(&raw.source_files, "Source", &raw.name)?;
            validate_distinct(&raw.resource_files, "Resource", &raw.name)?;
            validate_distinct(&raw.dependencies, "Dependency", &raw.name)?;
            validate_distinct(&raw.frameworks, "Framework", &raw.name)?;
        }

        let model = TargetModel::new(
            raw.name.clone(),
            raw.source_files.iter().cloned().collect(),
            raw.resource_files.iter().cloned().collect(),
            raw.dependencies.iter().cloned().collect(),
            raw.frameworks.iter().cloned().collect(),
        );
        if index.insert(raw.name.clone(), model).is_some() {
            return Err(LockstepError::DuplicateEntries {
                target: raw.name.clone(),
                context: "Target".to_string(),
                values: vec![raw.name.clone()],
            });
        }
    }

    let mut buildable: BTreeMap<String, HashSet<String>> = BTreeMap::new();
    for group in &snapshot.synced_groups {
        resolve_group(group, &index, &mut buildable, walker, sink)?;
    }

    for (name, files) in buildable {
        if let Some(model) = index.remove(&name) {
            index.insert(name, model.with_buildable_files(files));
        }
    }

    Ok(index)
}

/// Fold one synchronized group into the per-target buildable accumulators.
fn resolve_group(
    group: &SyncedGroup,
    index: &TargetIndex,
    buildable: &mut BTreeMap<String, HashSet<String>>,
    walker: &impl GroupWalker,
    sink: &mut impl ValidationSink,
) -> LockstepResult<()> {
    let files = walker.files_under(&group.root)?;
    let root = path_string(&group.root);
    sink.diagnostic(&format!(
        "synchronized group '{}' linked to {} target(s), {} file(s)",
        root,
        group.targets.len(),
        files.len(),
    ));

    for target in &group.targets {
        if !index.contains_key(target) {
            return Err(LockstepError::UnknownTarget {
                target: target.clone(),
                context: "synchronized group".to_string(),
            });
        }
        buildable
            .entry(target.clone())
            .or_default()
            .extend(files.iter().cloned());
    }

    for exception in &group.exceptions {
        if exception.kind != ExceptionKind::Membership {
            sink.diagnostic(&format!(
                "ignored non-membership exception '{}' for target '{}'",
                exception.path, exception.target,
            ));
            continue;
        }

        if !index.contains_key(&exception.target) {
            return Err(LockstepError::ExceptionTargetNotFound {
                target: exception.target.clone(),
            });
        }

        let product_type = exception.product_type.as_deref().ok_or_else(|| {
            LockstepError::MissingProductType {
                target: exception.target.clone(),
            }
        })?;
        let product_type = ProductType::parse(product_type, &exception.target)?;

        let entries = buildable.entry(exception.target.clone()).or_default();
        if product_type.is_test_bundle() {
            // Additive regardless of whether the file exists under the root.
            let joined = path_string(&group.root.join(&exception.path));
            entries.insert(joined.clone());
            sink.diagnostic(&format!(
                "exception added '{}' to target '{}'",
                joined, exception.target,
            ));
        } else {
            let before = entries.len();
            entries.retain(|path| !path.contains(&exception.path));
            sink.diagnostic(&format!(
                "exception removed {} path(s) containing '{}' from target '{}'",
                before - entries.len(),
                exception.path,
                exception.target,
            ));
        }
    }

    Ok(())
}
