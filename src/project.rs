//! Project snapshot input for lockstep
//!
//! The native project-file parser is an external collaborator. Its output
//! reaches lockstep as a JSON snapshot: per-target membership lists plus
//! synchronized-group descriptors. This module only decodes that snapshot,
//! it never parses project files itself.
//!
//! Resource file references are expected to arrive pre-corrected for
//! bundle-style resources (a `.strings` file is referenced through its
//! variant bundle, not the inner file).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{LockstepError, LockstepResult};

/// Decoded project snapshot, the raw input to the target model builder.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    /// Per-target raw membership lists, in project order
    pub targets: Vec<RawTarget>,

    /// Filesystem-synchronized groups with their exception entries
    #[serde(default)]
    pub synced_groups: Vec<SyncedGroup>,
}

/// Raw membership lists for one target, straight from the parser.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawTarget {
    /// Target name, unique within the project
    pub name: String,

    #[serde(default)]
    pub source_files: Vec<String>,

    #[serde(default)]
    pub resource_files: Vec<String>,

    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default)]
    pub frameworks: Vec<String>,
}

/// A filesystem-synchronized group: a root directory whose files feed the
/// buildable sets of every linked target, overridable via exceptions.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncedGroup {
    /// Group root directory
    pub root: PathBuf,

    /// Names of the targets this group contributes to
    #[serde(default)]
    pub targets: Vec<String>,

    /// Classified exception entries, in declaration order
    #[serde(default)]
    pub exceptions: Vec<GroupException>,
}

/// One synchronized-group exception entry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupException {
    /// Exception classification; only membership exceptions affect buildable sets
    pub kind: ExceptionKind,

    /// Target the exception applies to
    pub target: String,

    /// Product type of that target, as reported by the parser
    #[serde(default)]
    pub product_type: Option<String>,

    /// Relative path (test bundles) or path substring (everything else)
    pub path: String,
}

/// Exception classification.
///
/// Parsers emit more kinds than lockstep acts on; anything that is not a
/// build-file membership exception decodes to `Other` and is logged only.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionKind {
    Membership,
    #[serde(other)]
    Other,
}

impl ProjectSnapshot {
    /// Load a project snapshot from a JSON file.
    pub fn load(path: &Path) -> LockstepResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content, path)
    }

    /// Decode a project snapshot from a JSON string.
    pub fn from_json(content: &str, file: &Path) -> LockstepResult<Self> {
        serde_json::from_str(content).map_err(|e| LockstepError::Json {
            file: file.to_path_buf(),
            message: e.to_string(),
        })
    }
}
