//! # File State and Diff Types
//!
//! Defines the value types that flow through `FileSystemMap`: the desired or
//! actual state of a single file (`FileState`), the generator-attributed
//! variant used in desired maps (`StateWithChangeReason`), and the result of
//! comparing the two (`Diff` / `DiffWithChangeReason`).
//!
//! Grounded on `original_source/sharedapi/files/diff.go` (`State`,
//! `DiffResult`, `DiffAction`) and `system.go` (`Validatable`), re-expressed
//! with Rust enums instead of Go's `iota` constants and nil-checked pointers.

use crate::error::{Error, Result};

/// Whether a file exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    Present,
    Absent,
}

/// A thing that can be validated before it is allowed into a
/// `FileSystemMap`.
pub trait Validatable {
    fn validate(&self) -> Result<()>;
}

/// The desired or actual state of one file.
///
/// Invariant: `Absent` implies empty `contents` and `mode == 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileState {
    pub existence: Existence,
    pub contents: Vec<u8>,
    pub mode: u32,
}

impl FileState {
    pub fn absent() -> Self {
        FileState {
            existence: Existence::Absent,
            contents: Vec::new(),
            mode: 0,
        }
    }

    pub fn present(contents: Vec<u8>, mode: u32) -> Self {
        FileState {
            existence: Existence::Present,
            contents,
            mode,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self.existence, Existence::Present)
    }
}

impl Validatable for FileState {
    fn validate(&self) -> Result<()> {
        if matches!(self.existence, Existence::Absent)
            && (!self.contents.is_empty() || self.mode != 0)
        {
            return Err(Error::InvalidValue {
                path: String::new(),
                message: "absent file state must have empty contents and mode 0".to_string(),
            });
        }
        if self.mode > 0o777 {
            return Err(Error::InvalidValue {
                path: String::new(),
                message: format!("mode {:o} exceeds 9-bit POSIX permission range", self.mode),
            });
        }
        Ok(())
    }
}

/// A `FileState` tagged with a free-form reason, used in desired maps for
/// human diagnostics (e.g. "produced by generator 'staticfile'").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateWithChangeReason {
    pub state: FileState,
    pub reason: String,
}

impl StateWithChangeReason {
    pub fn new(state: FileState, reason: impl Into<String>) -> Self {
        StateWithChangeReason {
            state,
            reason: reason.into(),
        }
    }
}

impl Validatable for StateWithChangeReason {
    fn validate(&self) -> Result<()> {
        self.state.validate()
    }
}

/// The action a `Diff` prescribes for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffAction {
    Create,
    Update,
    Delete,
    NoChange,
}

/// The computed difference between an existing and a desired `FileState`.
///
/// `mode_change` / `contents_change` must be consistent with `action`:
/// `NoChange`/`Delete` carry neither, `Create` carries both, `Update`
/// carries at least one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff {
    pub old: FileState,
    pub new: FileState,
    pub action: DiffAction,
    pub mode_change: Option<u32>,
    pub contents_change: Option<Vec<u8>>,
}

impl Diff {
    pub fn no_change(old: FileState) -> Self {
        let new = old.clone();
        Diff {
            old,
            new,
            action: DiffAction::NoChange,
            mode_change: None,
            contents_change: None,
        }
    }

    pub fn create(new: FileState) -> Self {
        Diff {
            old: FileState::absent(),
            mode_change: Some(new.mode),
            contents_change: Some(new.contents.clone()),
            new,
            action: DiffAction::Create,
        }
    }

    pub fn delete(old: FileState) -> Self {
        Diff {
            old,
            new: FileState::absent(),
            action: DiffAction::Delete,
            mode_change: None,
            contents_change: None,
        }
    }

    pub fn update(old: FileState, new: FileState, mode_change: bool, contents_change: bool) -> Self {
        Diff {
            mode_change: if mode_change { Some(new.mode) } else { None },
            contents_change: if contents_change {
                Some(new.contents.clone())
            } else {
                None
            },
            old,
            new,
            action: DiffAction::Update,
        }
    }
}

impl Validatable for Diff {
    fn validate(&self) -> Result<()> {
        let bad = |message: &str| {
            Err(Error::DiffValidationFailed {
                path: String::new(),
                message: message.to_string(),
            })
        };
        match self.action {
            DiffAction::NoChange | DiffAction::Delete => {
                if self.mode_change.is_some() || self.contents_change.is_some() {
                    return bad("no-change/delete diffs must not carry mode or contents changes");
                }
            }
            DiffAction::Create => {
                if self.mode_change.is_none() || self.contents_change.is_none() {
                    return bad("create diffs must carry both mode and contents");
                }
            }
            DiffAction::Update => {
                if self.mode_change.is_none() && self.contents_change.is_none() {
                    return bad("update diffs must carry mode and/or contents");
                }
            }
        }
        Ok(())
    }
}

/// A `Diff` tagged with the reason its desired state was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffWithChangeReason {
    pub diff: Diff,
    pub reason: String,
}

impl Validatable for DiffWithChangeReason {
    fn validate(&self) -> Result<()> {
        self.diff.validate()
    }
}
