//! Phase 3: Merge pass.
//!
//! Merges every generator's desired-state map into one, failing with
//! `Error::ConflictingGenerators` if two generators produced state for the
//! same path.

use crate::error::Result;
use crate::filesystem::FileSystemMap;
use crate::state::StateWithChangeReason;

pub fn execute(
    per_generator: Vec<(String, FileSystemMap<StateWithChangeReason>)>,
) -> Result<FileSystemMap<StateWithChangeReason>> {
    FileSystemMap::merge(per_generator)
}
