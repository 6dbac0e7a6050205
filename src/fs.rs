//! Filesystem enumeration for synchronized groups
//!
//! The membership engine never touches the filesystem directly; it goes
//! through the `GroupWalker` trait. `FsWalker` is the production
//! implementation, `MockWalker` backs the tests.

use std::path::Path;

use crate::error::{LockstepError, LockstepResult};

/// Abstract enumerator for synchronized-group roots.
pub trait GroupWalker {
    /// All files recursively under `root`, as slash-separated path strings
    /// joined to the root, in sorted order.
    ///
    /// Fails when the root does not resolve to a directory.
    fn files_under(&self, root: &Path) -> LockstepResult<Vec<String>>;
}

/// Walker backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWalker;

impl FsWalker {
    pub fn new() -> Self {
        Self
    }
}

impl GroupWalker for FsWalker {
    fn files_under(&self, root: &Path) -> LockstepResult<Vec<String>> {
        if !root.is_dir() {
            return Err(LockstepError::GroupRootNotFound {
                root: root.to_path_buf(),
            });
        }

        let mut files = Vec::new();
        for entry in ignore::WalkBuilder::new(root)
            .standard_filters(false)
            .build()
        {
            let entry = entry.map_err(|e| std::io::Error::other(e.to_string()))?;
            if entry.file_type().is_some_and(|ft| ft.is_file()) {
                files.push(path_string(entry.path()));
            }
        }

        files.sort();
        Ok(files)
    }
}

/// Slash-separated string form of a path, the representation every
/// membership set uses.
pub fn path_string(path: &Path) -> String {
    let raw = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        raw.into_owned()
    } else {
        raw.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// Walker over an in-memory directory layout, for tests.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MockWalker {
    roots: std::collections::HashMap<std::path::PathBuf, Vec<String>>,
}

#[cfg(test)]
impl MockWalker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a root with the relative paths of the files beneath it.
    pub fn with_root(mut self, root: impl Into<std::path::PathBuf>, files: &[&str]) -> Self {
        self.roots
            .insert(root.into(), files.iter().map(|f| f.to_string()).collect());
        self
    }
}

#[cfg(test)]
impl GroupWalker for MockWalker {
    fn files_under(&self, root: &Path) -> LockstepResult<Vec<String>> {
        let files = self
            .roots
            .get(root)
            .ok_or_else(|| LockstepError::GroupRootNotFound {
                root: root.to_path_buf(),
            })?;

        let mut joined: Vec<String> = files
            .iter()
            .map(|rel| path_string(&root.join(rel)))
            .collect();
        joined.sort();
        Ok(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_walker_missing_root_is_typed_error() {
        let walker = FsWalker::new();
        let err = walker
            .files_under(Path::new("/nonexistent/lockstep-group"))
            .unwrap_err();
        assert!(matches!(err, LockstepError::GroupRootNotFound { .. }));
    }

    #[test]
    fn fs_walker_enumerates_recursively_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("Nested")).unwrap();
        std::fs::write(root.join("b.swift"), "").unwrap();
        std::fs::write(root.join("a.swift"), "").unwrap();
        std::fs::write(root.join("Nested/c.swift"), "").unwrap();

        let files = FsWalker::new().files_under(root).unwrap();
        assert_eq!(
            files,
            vec![
                path_string(&root.join("Nested/c.swift")),
                path_string(&root.join("a.swift")),
                path_string(&root.join("b.swift")),
            ]
        );
    }

    #[test]
    fn mock_walker_joins_root() {
        let walker = MockWalker::new().with_root("Shared", &["Gen.swift", "Api/Client.swift"]);
        let files = walker.files_under(Path::new("Shared")).unwrap();
        assert_eq!(files, vec!["Shared/Api/Client.swift", "Shared/Gen.swift"]);
    }

    #[test]
    fn mock_walker_unknown_root_fails() {
        let walker = MockWalker::new();
        let err = walker.files_under(Path::new("Shared")).unwrap_err();
        assert!(matches!(err, LockstepError::GroupRootNotFound { .. }));
    }
}
