//! Membership reconciliation and validation engine
//!
//! Pipeline: build the frozen aggregate index once, then run exclusivity
//! reconciliation and the forbidden-resource check against that same
//! index. Either check may fail independently; the first failure aborts
//! the run.

pub mod builder;
pub mod diff;
pub mod duplicates;
pub mod forbidden;
pub mod reconcile;


pub use builder::build_target_index;
pub use diff::{difference, MembershipDiff};
pub use duplicates::validate_distinct;
pub use forbidden::check_forbidden_resources;
pub use reconcile::reconcile;

use crate::config::Config;
use crate::error::LockstepResult;
use crate::fs::GroupWalker;
use crate::models::TargetIndex;
use crate::project::ProjectSnapshot;
use crate::report::ValidationSink;

/// Run the full membership validation pipeline.
///
/// Returns the frozen aggregate index; reaching the return value at all is
/// the success signal.
pub fn run_checks(
    snapshot: &ProjectSnapshot,
    config: &Config,
    walker: &impl GroupWalker,
    sink: &mut impl ValidationSink,
) -> LockstepResult<TargetIndex> {
    let index = build_target_index(snapshot, config, walker, sink)?;
    reconcile(&index, config, sink)?;
    check_forbidden_resources(&index, config, sink)?;
    Ok(index)
}
