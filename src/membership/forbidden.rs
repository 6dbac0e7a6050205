//! Forbidden Resource Matcher
//!
//! Checks resource paths against disallowed substrings. Reads the frozen
//! aggregate index; exclusivity pruning never affects this check. Fails on
//! the first violating pair, no aggregation across violations.

use crate::config::Config;
use crate::error::{LockstepError, LockstepResult};
use crate::models::TargetIndex;
use crate::report::ValidationSink;

/// Check every configured forbidden-resource rule against the index.
///
/// A rule with no targets, or a rule naming a target absent from this
/// project, is a warning only; such rules legitimately outlive individual
/// project variants.
pub fn check_forbidden_resources(
    index: &TargetIndex,
    config: &Config,
    sink: &mut impl ValidationSink,
) -> LockstepResult<()> {
    for set in &config.forbidden_resource_sets {
        if set.targets.is_empty() {
            sink.warning("forbidden resource set has no targets");
            continue;
        }

        for target_name in &set.targets {
            let Some(model) = index.get(target_name) else {
                sink.warning(&format!(
                    "forbidden resource set references unknown target '{target_name}'"
                ));
                continue;
            };

            for substring in &set.paths {
                let mut matching: Vec<String> = model
                    .resource_files()
                    .iter()
                    .filter(|path| path.contains(substring.as_str()))
                    .cloned()
                    .collect();
                if !matching.is_empty() {
                    matching.sort();
                    return Err(LockstepError::ForbiddenResource {
                        target: target_name.clone(),
                        paths: matching,
                    });
                }
            }
        }
    }

    Ok(())
}
