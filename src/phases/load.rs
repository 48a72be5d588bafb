//! Phase 4: Load pass.
//!
//! Loads the actual on-disk state for exactly the union of paths the Merge
//! phase produced, via the injected `StateLoader`. This is the existing
//! side of the diff: its path set is always identical to the desired map's,
//! satisfying the precondition `diff::calculate_diff` enforces.

use log::debug;

use crate::error::Result;
use crate::filesystem::FileSystemMap;
use crate::io::StateLoader;
use crate::state::{FileState, StateWithChangeReason};

pub fn execute(
    loader: &dyn StateLoader,
    desired: &FileSystemMap<StateWithChangeReason>,
) -> Result<FileSystemMap<FileState>> {
    let mut existing = FileSystemMap::new();
    for path in desired.paths() {
        debug!("loading existing state for {}", path);
        let state = loader.load(path)?;
        existing.add(path.clone(), state)?;
    }
    Ok(existing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::PosixStateLoader;
    use crate::path::Path;
    use crate::state::FileState;
    use tempfile::TempDir;

    #[test]
    fn test_load_covers_exactly_desired_paths() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("present.txt"), b"hi").unwrap();
        let loader = PosixStateLoader::new(dir.path());

        let mut desired = FileSystemMap::new();
        desired
            .add(
                Path::new("present.txt").unwrap(),
                StateWithChangeReason::new(FileState::present(b"hi".to_vec(), 0o644), "g"),
            )
            .unwrap();
        desired
            .add(
                Path::new("missing.txt").unwrap(),
                StateWithChangeReason::new(FileState::present(b"new".to_vec(), 0o644), "g"),
            )
            .unwrap();

        let existing = execute(&loader, &desired).unwrap();
        assert_eq!(existing.len(), 2);
        assert!(existing.get(&Path::new("present.txt").unwrap()).unwrap().is_present());
        assert!(!existing.get(&Path::new("missing.txt").unwrap()).unwrap().is_present());
    }
}
