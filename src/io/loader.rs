//! # StateLoader
//!
//! Reads the actual on-disk state of a single path. A missing file maps to
//! `FileState::absent()` rather than an error; any other I/O failure
//! propagates.
//!
//! Grounded on `original_source/sharedapi/files/os.go`'s `osLoader.LoadState`
//! / `NewStateFromPath`.

use std::path::PathBuf;

use crate::error::Result;
use crate::path::Path;
use crate::state::FileState;

/// Reads file state from a backing store (real filesystem or virtual).
pub trait StateLoader {
    fn load(&self, path: &Path) -> Result<FileState>;
}

/// Loads state from the real filesystem rooted at `destination_root`.
pub struct PosixStateLoader {
    destination_root: PathBuf,
}

impl PosixStateLoader {
    pub fn new(destination_root: impl Into<PathBuf>) -> Self {
        PosixStateLoader {
            destination_root: destination_root.into(),
        }
    }

    fn full_path(&self, path: &Path) -> PathBuf {
        self.destination_root.join(path.as_std_path())
    }
}

impl StateLoader for PosixStateLoader {
    fn load(&self, path: &Path) -> Result<FileState> {
        let full_path = self.full_path(path);
        match std::fs::metadata(&full_path) {
            Ok(metadata) => {
                let contents = std::fs::read(&full_path)?;
                #[cfg(unix)]
                let mode = {
                    use std::os::unix::fs::PermissionsExt;
                    metadata.permissions().mode() & 0o777
                };
                #[cfg(not(unix))]
                let mode = if metadata.permissions().readonly() {
                    0o444
                } else {
                    0o644
                };
                Ok(FileState::present(contents, mode))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileState::absent()),
            Err(e) => Err(e.into()),
        }
    }
}
