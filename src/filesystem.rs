//! # FileSystemMap
//!
//! An ordered mapping from `Path` to an arbitrary validatable value `T`. This
//! is the backbone type that flows through the whole drift pipeline: desired
//! maps hold `StateWithChangeReason`, existing maps hold `FileState`, diff
//! maps hold `DiffWithChangeReason`.
//!
//! Grounded on `original_source/sharedapi/files/system.go`'s `System[T
//! Validatable]`, adapted from the teacher's `filesystem.rs::MemoryFS`
//! (`HashMap`-backed store with a parallel add/remove/merge API) generalized
//! from a concrete `File` value to a type parameter, per `spec.md` §4.1.
//!
//! Iteration order is insertion order (for deterministic diagnostics), but
//! membership and equality are set semantics as `spec.md` §3 requires.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::path::Path;
use crate::state::Validatable;

/// An ordered mapping from `Path` to a validated value `T`.
#[derive(Debug, Clone)]
pub struct FileSystemMap<T> {
    values: HashMap<Path, T>,
    order: Vec<Path>,
}

impl<T> Default for FileSystemMap<T> {
    fn default() -> Self {
        FileSystemMap {
            values: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T: Validatable> FileSystemMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` at `path`. Fails if the path is already tracked or if
    /// `value` does not validate.
    pub fn add(&mut self, path: Path, value: T) -> Result<()> {
        if self.values.contains_key(&path) {
            return Err(Error::already_present(&path));
        }
        value.validate().map_err(|e| match e {
            Error::InvalidValue { message, .. } => Error::InvalidValue {
                path: path.as_str().to_string(),
                message,
            },
            other => other,
        })?;
        self.order.push(path.clone());
        self.values.insert(path, value);
        Ok(())
    }

    /// All tracked paths, in insertion order.
    pub fn paths(&self) -> &[Path] {
        &self.order
    }

    pub fn get(&self, path: &Path) -> Option<&T> {
        self.values.get(path)
    }

    pub fn is_tracked(&self, path: &Path) -> bool {
        self.values.contains_key(path)
    }

    /// Removes and returns the value at `path`, if tracked.
    pub fn remove(&mut self, path: &Path) -> Option<T> {
        let removed = self.values.remove(path);
        if removed.is_some() {
            self.order.retain(|p| p != path);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates `(path, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &T)> {
        self.order.iter().map(move |p| (p, &self.values[p]))
    }
}

impl<T: Validatable + Clone> FileSystemMap<T> {
    /// Merges `maps` into one. Fails with `Error::ConflictingGenerators` if
    /// any path appears in more than one input map; callers attach the
    /// generator names that produced each side.
    pub fn merge(maps: Vec<(String, FileSystemMap<T>)>) -> Result<FileSystemMap<T>>
    where
        T: std::fmt::Debug,
    {
        let mut result = FileSystemMap::new();
        let mut owner: HashMap<Path, String> = HashMap::new();
        for (owner_name, map) in maps {
            for path in map.paths() {
                let value = map.get(path).expect("path came from paths()").clone();
                if let Some(existing_owner) = owner.get(path) {
                    return Err(Error::ConflictingGenerators {
                        path: path.as_str().to_string(),
                        left: existing_owner.clone(),
                        right: owner_name.clone(),
                    });
                }
                result.add(path.clone(), value)?;
                owner.insert(path.clone(), owner_name.clone());
            }
        }
        Ok(result)
    }
}
