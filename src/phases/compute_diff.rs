//! Phase 5: Compute-diff pass.
//!
//! Thin wrapper around `diff::calculate_diff`, kept as its own phase module
//! so the orchestrator's phase list matches `spec.md` §4.6 one-for-one.

use crate::diff;
use crate::error::Result;
use crate::filesystem::FileSystemMap;
use crate::state::{DiffWithChangeReason, FileState, StateWithChangeReason};

pub fn execute(
    existing: &FileSystemMap<FileState>,
    desired: &FileSystemMap<StateWithChangeReason>,
) -> Result<FileSystemMap<DiffWithChangeReason>> {
    diff::calculate_diff(existing, desired)
}
