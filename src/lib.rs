//! lockstep - build-target membership validator
//!
//! lockstep keeps related build targets (app flavors, extensions, test
//! bundles) synchronized in membership: source files, resources,
//! dependencies and linked frameworks. Intentional per-target differences
//! are declared in a configuration file; anything undeclared is drift and
//! fails the check. It also rejects known-bad resource paths and duplicate
//! membership entries.

pub mod config;
pub mod error;
pub mod fs;
pub mod membership;
pub mod models;
pub mod project;
pub mod report;

// Re-exports for convenience
pub use config::{Config, ForbiddenResourceSet, MembershipSet, TargetExclusive};
pub use error::{LockstepError, LockstepResult};
pub use fs::{FsWalker, GroupWalker};
pub use membership::{run_checks, MembershipDiff};
pub use models::{ProductType, Target, TargetIndex, TargetModel};
pub use project::{ExceptionKind, GroupException, ProjectSnapshot, RawTarget, SyncedGroup};
pub use report::{
    CallbackSink, ConsoleSink, MessageKind, RecordingSink, ReportMessage, ValidationSink,
};
