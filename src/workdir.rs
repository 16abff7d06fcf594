//! Disposable working copy of the project
//!
//! Install and list run against a throwaway duplicate of the project
//! directory, so nothing touches the real project before the user has
//! approved anything. The copy lives in a temp directory: explicit
//! `teardown` surfaces removal errors on the normal path, and `Drop`
//! removes it on every other path (errors, cancellation).

use crate::error::WorkdirError;
use crate::manifest::MANIFEST_FILE;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Directories never copied into the working copy
const SKIP_DIRS: &[&str] = &["bower_components", "node_modules", ".git"];

/// An isolated duplicate of the project directory
#[derive(Debug)]
pub struct WorkingCopy {
    dir: TempDir,
}

impl WorkingCopy {
    /// Copies `project_dir` into a fresh temporary directory
    pub fn create(project_dir: &Path) -> Result<Self, WorkdirError> {
        let dir =
            TempDir::with_prefix("bowup-").map_err(|e| WorkdirError::setup(project_dir, e))?;
        copy_tree(project_dir, dir.path()).map_err(|e| WorkdirError::setup(project_dir, e))?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.path().join(MANIFEST_FILE)
    }

    /// Removes the copy, surfacing removal errors.
    /// Dropping without calling this still removes it, silently.
    pub fn teardown(self) -> Result<(), WorkdirError> {
        let path = self.dir.path().to_path_buf();
        self.dir.close().map_err(|e| WorkdirError::teardown(path, e))
    }
}

fn copy_tree(from: &Path, to: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let name = entry.file_name();
        let target = to.join(&name);

        if file_type.is_dir() {
            if SKIP_DIRS.iter().any(|skip| name == *skip) {
                continue;
            }
            fs::create_dir(&target)?;
            copy_tree(&entry.path(), &target)?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target)?;
        }
        // symlinks and special files are not carried over
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), "{}").unwrap();
        fs::write(dir.path().join(".bowerrc"), "{}").unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/app.js"), "// app").unwrap();
        fs::create_dir(dir.path().join("bower_components")).unwrap();
        fs::write(dir.path().join("bower_components/junk.js"), "junk").unwrap();
        dir
    }

    #[test]
    fn test_create_copies_project_files() {
        let project = sample_project();
        let copy = WorkingCopy::create(project.path()).unwrap();

        assert!(copy.manifest_path().exists());
        assert!(copy.path().join(".bowerrc").exists());
        assert!(copy.path().join("src/app.js").exists());
    }

    #[test]
    fn test_create_skips_installed_components() {
        let project = sample_project();
        let copy = WorkingCopy::create(project.path()).unwrap();
        assert!(!copy.path().join("bower_components").exists());
    }

    #[test]
    fn test_teardown_removes_copy() {
        let project = sample_project();
        let copy = WorkingCopy::create(project.path()).unwrap();
        let path = copy.path().to_path_buf();

        copy.teardown().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_removes_copy() {
        let project = sample_project();
        let path;
        {
            let copy = WorkingCopy::create(project.path()).unwrap();
            path = copy.path().to_path_buf();
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_create_missing_project_fails() {
        let err = WorkingCopy::create(Path::new("/nonexistent/project")).unwrap_err();
        assert!(matches!(err, WorkdirError::Setup { .. }));
    }

    #[test]
    fn test_copies_are_independent() {
        let project = sample_project();
        let copy = WorkingCopy::create(project.path()).unwrap();

        fs::write(copy.manifest_path(), r#"{"mutated": true}"#).unwrap();
        let original = fs::read_to_string(project.path().join(MANIFEST_FILE)).unwrap();
        assert_eq!(original, "{}");
    }
}
