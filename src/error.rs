//! Error types for lockstep
//!
//! Uses `thiserror` for library errors. Every validation failure is a
//! distinct, describable variant; warnings never appear here, they go
//! through the report sink instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for lockstep operations
pub type LockstepResult<T> = Result<T, LockstepError>;

/// Main error type for lockstep operations
#[derive(Error, Debug)]
pub enum LockstepError {
    /// An exclusive map references a target that does not exist in the index
    #[error("exclusive entry references unknown target '{target}'")]
    UnknownExclusiveTarget { target: String },

    /// A declared exclusive pattern matched nothing in the current aggregate
    #[error("exclusive pattern '{pattern}' declared for target '{target}' matched nothing")]
    ExclusiveEntryUnmatched { target: String, pattern: String },

    /// Undeclared drift remains within a membership group after pruning
    #[error(
        "undeclared differences between targets [{}]: files [{}], dependencies [{}], frameworks [{}]",
        .targets.join(", "),
        .files.join(", "),
        .dependencies.join(", "),
        .frameworks.join(", ")
    )]
    ResidualDifference {
        targets: Vec<String>,
        files: Vec<String>,
        dependencies: Vec<String>,
        frameworks: Vec<String>,
    },

    /// A membership category of a target contains the same entry twice
    #[error("duplicate {context} entries in target '{target}': [{}]", .values.join(", "))]
    DuplicateEntries {
        target: String,
        context: String,
        values: Vec<String>,
    },

    /// A resource path matched a forbidden substring
    #[error("forbidden resource paths in target '{target}': [{}]", .paths.join(", "))]
    ForbiddenResource { target: String, paths: Vec<String> },

    /// Synchronized group root directory does not exist
    #[error("synchronized group root not found: {root}")]
    GroupRootNotFound { root: PathBuf },

    /// A target list references a name absent from the aggregate index
    #[error("{context} references unknown target '{target}'")]
    UnknownTarget { target: String, context: String },

    /// A synchronized-group exception names a target that does not exist
    #[error("synchronized group exception references missing target '{target}'")]
    ExceptionTargetNotFound { target: String },

    /// A membership exception carries no product type
    #[error("missing product type on membership exception for target '{target}'")]
    MissingProductType { target: String },

    /// A membership exception carries a product type lockstep does not know
    #[error("unknown product type '{value}' on membership exception for target '{target}'")]
    UnknownProductType { target: String, value: String },

    /// Configuration contained keys outside the documented shape
    #[error("unknown configuration keys in {file}: [{}]", .keys.join(", "))]
    UnknownConfigKeys { file: PathBuf, keys: Vec<String> },

    /// JSON decode failure for a snapshot or configuration file
    #[error("invalid JSON in {file}: {message}")]
    Json { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
