//! Applier: executes a computed diff map against a `DiffExecutor`.
//!
//! Grounded on the teacher's `phases/write.rs::execute` (directory
//! creation, permission setting, error wrapping), generalized from
//! "always create" to the full `DiffAction` switch implemented by
//! `io::executor::PosixDiffExecutor`. Diffs are applied in path-sorted
//! order for deterministic, reproducible runs; the first error aborts the
//! remaining diffs.

use log::{debug, info};

use crate::error::Result;
use crate::filesystem::FileSystemMap;
use crate::io::DiffExecutor;
use crate::state::DiffWithChangeReason;

pub struct Applier<'a> {
    executor: &'a dyn DiffExecutor,
}

impl<'a> Applier<'a> {
    pub fn new(executor: &'a dyn DiffExecutor) -> Self {
        Applier { executor }
    }

    /// Applies every non-`NoChange` diff in `diffs`, in path-sorted order.
    pub fn apply(&self, diffs: &FileSystemMap<DiffWithChangeReason>) -> Result<()> {
        let mut paths: Vec<_> = diffs.paths().to_vec();
        paths.sort();

        for path in &paths {
            let entry = diffs.get(path).expect("path came from paths()");
            if matches!(entry.diff.action, crate::state::DiffAction::NoChange) {
                continue;
            }
            debug!("applying {:?} to {}", entry.diff.action, path);
            self.executor.execute(path, &entry.diff)?;
        }
        info!("applied {} changes", paths.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::PosixDiffExecutor;
    use crate::path::Path;
    use crate::state::{Diff, FileState};
    use tempfile::TempDir;

    #[test]
    fn test_apply_writes_creates_and_skips_no_change() {
        let dir = TempDir::new().unwrap();
        let executor = PosixDiffExecutor::new(dir.path());
        let applier = Applier::new(&executor);

        let mut diffs = FileSystemMap::new();
        diffs
            .add(
                Path::new("new.txt").unwrap(),
                DiffWithChangeReason {
                    diff: Diff::create(FileState::present(b"hi".to_vec(), 0o644)),
                    reason: "g".to_string(),
                },
            )
            .unwrap();
        diffs
            .add(
                Path::new("unchanged.txt").unwrap(),
                DiffWithChangeReason {
                    diff: Diff::no_change(FileState::absent()),
                    reason: "g".to_string(),
                },
            )
            .unwrap();

        applier.apply(&diffs).unwrap();

        assert!(dir.path().join("new.txt").exists());
        assert!(!dir.path().join("unchanged.txt").exists());
    }
}
