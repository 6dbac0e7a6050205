//! Core data models for lockstep
//!
//! Defines the fundamental data structures used throughout lockstep:
//! - `TargetModel`: the frozen per-target membership aggregate
//! - `Target`: the reduced working view used during reconciliation
//! - `ProductType`: build product classification for exception handling
//! - `TargetIndex`: the name-keyed aggregate index

use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use crate::error::{LockstepError, LockstepResult};

/// Name-keyed aggregate index, built once per run and frozen afterwards.
///
/// A `BTreeMap` keeps iteration deterministic for reporting.
pub type TargetIndex = BTreeMap<String, TargetModel>;

/// Build product classification carried by synchronized-group exceptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductType {
    /// Application bundle
    App,
    /// Application extension
    AppExtension,
    /// Dynamic or static framework
    Framework,
    /// Unit test bundle
    UnitTest,
    /// UI test bundle
    UiTest,
}

impl ProductType {
    /// Test bundles get additive exception semantics, everything else subtractive.
    pub fn is_test_bundle(&self) -> bool {
        matches!(self, ProductType::UnitTest | ProductType::UiTest)
    }

    /// Parse the product type string attached to a membership exception.
    ///
    /// `target` is only used to produce a precise error value.
    pub fn parse(value: &str, target: &str) -> LockstepResult<Self> {
        ProductType::from_str(value).map_err(|()| LockstepError::UnknownProductType {
            target: target.to_string(),
            value: value.to_string(),
        })
    }
}

impl FromStr for ProductType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "app" => Ok(ProductType::App),
            "app-extension" => Ok(ProductType::AppExtension),
            "framework" => Ok(ProductType::Framework),
            "unit-test" => Ok(ProductType::UnitTest),
            "ui-test" => Ok(ProductType::UiTest),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProductType::App => "app",
            ProductType::AppExtension => "app-extension",
            ProductType::Framework => "framework",
            ProductType::UnitTest => "unit-test",
            ProductType::UiTest => "ui-test",
        };
        write!(f, "{name}")
    }
}

/// Frozen per-target membership aggregate.
///
/// The three file sets are not necessarily disjoint. `file_paths` is derived
/// from them and is never patched in place: any change goes through a
/// constructor that rebuilds the whole value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetModel {
    name: String,
    buildable_files: HashSet<String>,
    source_files: HashSet<String>,
    resource_files: HashSet<String>,
    dependencies: HashSet<String>,
    frameworks: HashSet<String>,
    file_paths: HashSet<String>,
}

impl TargetModel {
    /// Create a model from parsed membership lists, with no buildable files yet.
    pub fn new(
        name: impl Into<String>,
        source_files: HashSet<String>,
        resource_files: HashSet<String>,
        dependencies: HashSet<String>,
        frameworks: HashSet<String>,
    ) -> Self {
        let mut model = Self {
            name: name.into(),
            buildable_files: HashSet::new(),
            source_files,
            resource_files,
            dependencies,
            frameworks,
            file_paths: HashSet::new(),
        };
        model.file_paths = model.compute_file_paths();
        model
    }

    /// Rebuild the model with a replaced buildable set, recomputing `file_paths`.
    pub fn with_buildable_files(self, buildable_files: HashSet<String>) -> Self {
        let mut model = Self {
            buildable_files,
            ..self
        };
        model.file_paths = model.compute_file_paths();
        model
    }

    fn compute_file_paths(&self) -> HashSet<String> {
        self.buildable_files
            .iter()
            .chain(self.source_files.iter())
            .chain(self.resource_files.iter())
            .cloned()
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn buildable_files(&self) -> &HashSet<String> {
        &self.buildable_files
    }

    pub fn source_files(&self) -> &HashSet<String> {
        &self.source_files
    }

    pub fn resource_files(&self) -> &HashSet<String> {
        &self.resource_files
    }

    pub fn dependencies(&self) -> &HashSet<String> {
        &self.dependencies
    }

    pub fn frameworks(&self) -> &HashSet<String> {
        &self.frameworks
    }

    /// Union of buildable, source and resource files.
    pub fn file_paths(&self) -> &HashSet<String> {
        &self.file_paths
    }
}

/// Reduced working view of a target used during exclusivity reconciliation.
///
/// Derived from a frozen `TargetModel`, changed only through pruning
/// operations that return updated copies, and discarded after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub file_paths: HashSet<String>,
    pub dependencies: HashSet<String>,
    pub frameworks: HashSet<String>,
}

impl From<&TargetModel> for Target {
    fn from(model: &TargetModel) -> Self {
        Self {
            name: model.name().to_string(),
            file_paths: model.file_paths().clone(),
            dependencies: model.dependencies().clone(),
            frameworks: model.frameworks().clone(),
        }
    }
}

impl Target {
    /// Copy of this target with the given file paths removed.
    pub fn without_file_paths(&self, matched: &HashSet<String>) -> Self {
        Self {
            file_paths: self.file_paths.difference(matched).cloned().collect(),
            ..self.clone()
        }
    }

    /// Copy of this target with the given dependencies removed.
    pub fn without_dependencies(&self, matched: &HashSet<String>) -> Self {
        Self {
            dependencies: self.dependencies.difference(matched).cloned().collect(),
            ..self.clone()
        }
    }

    /// Copy of this target with the given frameworks removed.
    pub fn without_frameworks(&self, matched: &HashSet<String>) -> Self {
        Self {
            frameworks: self.frameworks.difference(matched).cloned().collect(),
            ..self.clone()
        }
    }
}

/// Sorted copy of a string set, for display and error payloads.
pub fn sorted(set: &HashSet<String>) -> Vec<String> {
    let mut values: Vec<String> = set.iter().cloned().collect();
    values.sort();
    values
}
