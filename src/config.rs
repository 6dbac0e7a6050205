//! Configuration module for lockstep
//!
//! Decodes the membership configuration JSON:
//! - `fileMembershipSets`: groups of targets expected to match after
//!   declared exclusives are pruned
//! - `forbiddenResourceSets`: per-target disallowed resource substrings
//! - `duplicatesValidationExcludedTargets`: targets exempt from duplicate checks
//!
//! Decoding is strict: keys outside the documented shape fail the load with a
//! typed error. Unknown-key detection goes through `serde_ignored`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{LockstepError, LockstepResult};

/// Membership configuration for one project.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Human-readable configuration name
    pub name: String,

    /// Groups of targets whose membership must reconcile
    pub file_membership_sets: Vec<MembershipSet>,

    /// Disallowed resource path substrings per target set
    #[serde(default)]
    pub forbidden_resource_sets: Vec<ForbiddenResourceSet>,

    /// Targets exempt from all duplicate checks
    #[serde(default)]
    pub duplicates_validation_excluded_targets: Vec<String>,
}

/// A set of target names expected to be identical after exclusives are removed.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MembershipSet {
    /// Target names in this group
    pub targets: Vec<String>,

    /// Declared intentional per-target exceptions.
    ///
    /// `BTreeMap` keeps pruning order deterministic.
    #[serde(default)]
    pub exclusive: BTreeMap<String, TargetExclusive>,
}

/// Entries declared as intentionally unique to one target within a group.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TargetExclusive {
    /// File path patterns; a trailing `/*` or `/.*` matches the directory prefix
    #[serde(default)]
    pub files: Vec<String>,

    /// Dependency name patterns, exact match first then substring
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Framework name patterns, exact match first then substring
    #[serde(default)]
    pub frameworks: Vec<String>,
}

/// Forbidden resource substrings applied to a set of targets.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ForbiddenResourceSet {
    /// Target names this rule applies to
    pub targets: Vec<String>,

    /// Disallowed path substrings
    #[serde(default)]
    pub paths: Vec<String>,
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> LockstepResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content, path)
    }

    /// Decode configuration from a JSON string.
    ///
    /// `file` is only used in error values.
    pub fn from_json(content: &str, file: &Path) -> LockstepResult<Self> {
        let mut unknown_paths: Vec<String> = Vec::new();
        let mut deserializer = serde_json::Deserializer::from_str(content);

        let config: Self = serde_ignored::deserialize(&mut deserializer, |path| {
            unknown_paths.push(path.to_string());
        })
        .map_err(|e| LockstepError::Json {
            file: file.to_path_buf(),
            message: e.to_string(),
        })?;

        if !unknown_paths.is_empty() {
            unknown_paths.sort();
            return Err(LockstepError::UnknownConfigKeys {
                file: file.to_path_buf(),
                keys: unknown_paths,
            });
        }

        Ok(config)
    }

    /// True when the target is exempt from duplicate validation.
    pub fn is_duplicates_excluded(&self, target: &str) -> bool {
        self.duplicates_validation_excluded_targets
            .iter()
            .any(|t| t == target)
    }
}
