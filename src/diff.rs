//! # Diff Engine
//!
//! Computes a per-path `Diff` from an existing `FileSystemMap<FileState>`
//! and a desired `FileSystemMap<StateWithChangeReason>`.
//!
//! Grounded on `original_source/sharedapi/files/diff.go`'s `CalculateDiff`,
//! re-expressed with the action table from `spec.md` §4.3 spelled out
//! explicitly rather than inferred from nested `Validate` calls.

use crate::error::{Error, Result};
use crate::filesystem::FileSystemMap;
use crate::path::Path;
use crate::state::{Diff, DiffAction, DiffWithChangeReason, Existence, FileState};

/// Computes the diff map for the union of paths in `desired`.
///
/// Precondition: every path in `desired` must also appear in `existing` —
/// the Planner is responsible for pre-loading existing state for exactly
/// that union (see `phases::load`). A path present in `existing` but absent
/// from `desired` indicates the existing-state snapshot was built
/// incorrectly, and is treated as an internal error.
pub fn calculate_diff(
    existing: &FileSystemMap<FileState>,
    desired: &FileSystemMap<crate::state::StateWithChangeReason>,
) -> Result<FileSystemMap<DiffWithChangeReason>> {
    let mut result = FileSystemMap::new();

    for path in desired.paths() {
        let existing_state = existing.get(path).ok_or_else(|| Error::DiffValidationFailed {
            path: path.as_str().to_string(),
            message: "desired path has no pre-loaded existing state".to_string(),
        })?;
        let desired_state = desired.get(path).expect("path came from paths()");

        let diff = diff_one(existing_state, &desired_state.state)?;
        result.add(
            path.clone(),
            DiffWithChangeReason {
                diff,
                reason: desired_state.reason.clone(),
            },
        )?;
    }

    for path in existing.paths() {
        if !desired.is_tracked(path) {
            return Err(Error::DiffValidationFailed {
                path: path.as_str().to_string(),
                message: "existing state present for a path absent from desired".to_string(),
            });
        }
    }

    Ok(result)
}

/// Computes the diff table entry for a single path (`spec.md` §4.3).
fn diff_one(existing: &FileState, desired: &FileState) -> Result<Diff> {
    use Existence::{Absent, Present};

    let diff = match (existing.existence, desired.existence) {
        (Absent, Absent) => Diff::no_change(existing.clone()),
        (Absent, Present) => Diff::create(desired.clone()),
        (Present, Absent) => Diff::delete(existing.clone()),
        (Present, Present) => {
            let contents_equal = existing.contents == desired.contents;
            let mode_equal = existing.mode == desired.mode;
            match (contents_equal, mode_equal) {
                (true, true) => Diff::no_change(existing.clone()),
                (false, true) => {
                    Diff::update(existing.clone(), desired.clone(), false, true)
                }
                (true, false) => {
                    Diff::update(existing.clone(), desired.clone(), true, false)
                }
                (false, false) => {
                    Diff::update(existing.clone(), desired.clone(), true, true)
                }
            }
        }
    };

    use crate::state::Validatable;
    diff.validate()?;
    Ok(diff)
}

/// Returns `true` if every diff in `diffs` is `NoChange`.
pub fn is_empty_diff(diffs: &FileSystemMap<DiffWithChangeReason>) -> bool {
    diffs
        .iter()
        .all(|(_, d)| matches!(d.diff.action, DiffAction::NoChange))
}

/// Returns the diff's action for a given path, if tracked.
pub fn action_for(diffs: &FileSystemMap<DiffWithChangeReason>, path: &Path) -> Option<DiffAction> {
    diffs.get(path).map(|d| d.diff.action)
}
