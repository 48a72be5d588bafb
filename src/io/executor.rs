//! # DiffExecutor
//!
//! Applies a single `Diff` to a backing store: no-op, unlink, create (with
//! parent directories), or update (chmod before rewrite, per `spec.md` §5's
//! atomicity note).
//!
//! Grounded on `original_source/sharedapi/files/diff.go`'s
//! `ExecuteDiffOnOs` and the teacher's `phases/write.rs::execute`
//! (directory creation, `Error::Filesystem`-style wrapping), generalized
//! from "always create" to the full `DiffAction` switch.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::path::Path;
use crate::state::{Diff, DiffAction};

/// Executes a single `Diff` against a backing store.
pub trait DiffExecutor {
    fn execute(&self, path: &Path, diff: &Diff) -> Result<()>;
}

/// Executes diffs against the real filesystem rooted at `destination_root`.
pub struct PosixDiffExecutor {
    destination_root: PathBuf,
}

impl PosixDiffExecutor {
    pub fn new(destination_root: impl Into<PathBuf>) -> Self {
        PosixDiffExecutor {
            destination_root: destination_root.into(),
        }
    }

    fn full_path(&self, path: &Path) -> PathBuf {
        self.destination_root.join(path.as_std_path())
    }

    fn wrap(path: &Path, source: std::io::Error) -> Error {
        Error::ExecutorFailed {
            path: path.as_str().to_string(),
            source,
        }
    }
}

impl DiffExecutor for PosixDiffExecutor {
    fn execute(&self, path: &Path, diff: &Diff) -> Result<()> {
        let full_path = self.full_path(path);

        match diff.action {
            DiffAction::NoChange => Ok(()),
            DiffAction::Delete => {
                std::fs::remove_file(&full_path).map_err(|e| Self::wrap(path, e))
            }
            DiffAction::Create => {
                if let Some(parent) = full_path.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| Self::wrap(path, e))?;
                }
                let contents = diff
                    .contents_change
                    .as_ref()
                    .expect("Create diff validated to carry contents");
                let mode = diff
                    .mode_change
                    .expect("Create diff validated to carry mode");
                write_with_mode(&full_path, contents, mode).map_err(|e| Self::wrap(path, e))
            }
            DiffAction::Update => {
                // chmod before rewrite so the file never briefly exists with
                // new contents under stale permissions.
                if let Some(mode) = diff.mode_change {
                    set_mode(&full_path, mode).map_err(|e| Self::wrap(path, e))?;
                }
                if let Some(contents) = &diff.contents_change {
                    std::fs::write(&full_path, contents).map_err(|e| Self::wrap(path, e))?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(unix)]
fn write_with_mode(path: &std::path::Path, contents: &[u8], mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::write(path, contents)?;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn write_with_mode(path: &std::path::Path, contents: &[u8], _mode: u32) -> std::io::Result<()> {
    std::fs::write(path, contents)
}

#[cfg(unix)]
fn set_mode(path: &std::path::Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &std::path::Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FileState;
    use tempfile::TempDir;

    #[test]
    fn test_create_writes_file_and_parents() {
        let dir = TempDir::new().unwrap();
        let executor = PosixDiffExecutor::new(dir.path());
        let path = Path::new("nested/dir/file.txt").unwrap();
        let diff = Diff::create(FileState::present(b"hello\n".to_vec(), 0o644));

        executor.execute(&path, &diff).unwrap();

        let on_disk = std::fs::read(dir.path().join("nested/dir/file.txt")).unwrap();
        assert_eq!(on_disk, b"hello\n");
    }

    #[test]
    fn test_delete_removes_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"x").unwrap();
        let executor = PosixDiffExecutor::new(dir.path());
        let path = Path::new("a.txt").unwrap();
        let diff = Diff::delete(FileState::present(b"x".to_vec(), 0o644));

        executor.execute(&path, &diff).unwrap();

        assert!(!dir.path().join("a.txt").exists());
    }

    #[test]
    fn test_no_change_is_noop() {
        let dir = TempDir::new().unwrap();
        let executor = PosixDiffExecutor::new(dir.path());
        let path = Path::new("missing.txt").unwrap();
        let diff = Diff::no_change(FileState::absent());
        executor.execute(&path, &diff).unwrap();
        assert!(!dir.path().join("missing.txt").exists());
    }

    #[test]
    fn test_update_contents_only() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"old").unwrap();
        let executor = PosixDiffExecutor::new(dir.path());
        let path = Path::new("a.txt").unwrap();
        let diff = Diff::update(
            FileState::present(b"old".to_vec(), 0o644),
            FileState::present(b"new".to_vec(), 0o644),
            false,
            true,
        );
        executor.execute(&path, &diff).unwrap();
        assert_eq!(std::fs::read(dir.path().join("a.txt")).unwrap(), b"new");
    }

    #[cfg(unix)]
    #[test]
    fn test_update_chmod_before_rewrite() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("a.txt");
        std::fs::write(&file_path, b"old").unwrap();
        std::fs::set_permissions(&file_path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let executor = PosixDiffExecutor::new(dir.path());
        let path = Path::new("a.txt").unwrap();
        let diff = Diff::update(
            FileState::present(b"old".to_vec(), 0o644),
            FileState::present(b"new".to_vec(), 0o600),
            true,
            true,
        );
        executor.execute(&path, &diff).unwrap();

        let metadata = std::fs::metadata(&file_path).unwrap();
        assert_eq!(metadata.permissions().mode() & 0o777, 0o600);
        assert_eq!(std::fs::read(&file_path).unwrap(), b"new");
    }

    #[test]
    fn test_delete_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let executor = PosixDiffExecutor::new(dir.path());
        let path = Path::new("missing.txt").unwrap();
        let diff = Diff::delete(FileState::present(b"x".to_vec(), 0o644));
        assert!(executor.execute(&path, &diff).is_err());
    }
}
