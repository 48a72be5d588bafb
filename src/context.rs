//! # RunContext
//!
//! The immutable handle threaded through a single Plan or Apply invocation:
//! the parsed root config, the registry of generators, the destination
//! root, and a cooperative cancellation flag.
//!
//! Grounded on `original_source/sharedapi/syncer/syncrun.go`'s `SyncRun`
//! struct. The teacher's codebase and the rest of the retrieval pack carry
//! no async runtime for a single-threaded batch tool, so cancellation is
//! expressed as a shared `AtomicBool` checked between generator invocations
//! rather than a `CancellationToken` crate (`spec.md` §6).

use std::path::{Path as StdPath, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::RootConfig;
use crate::error::{Error, Result};
use crate::registry::Registry;

/// Shared, cloneable handle that lets any caller request cancellation of an
/// in-progress Plan/Apply.
#[derive(Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        CancellationFlag(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Returns `Error::Cancelled` if cancellation has been requested.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// The immutable context passed to every generator invocation in a run.
///
/// `run_config` is the opaque subtree of the sync entry currently being run
/// -- `Value::Null` on the top-level context built before Run, and scoped
/// to one entry via `for_run_config` for the duration of that entry's
/// `Generator::run` call. A generator kind shared by several sync entries
/// (e.g. two `staticfile` entries) sees a different `run_config` each time
/// despite being the same registered instance.
pub struct RunContext {
    pub root_config: RootConfig,
    pub registry: Arc<Registry>,
    pub destination_root: PathBuf,
    pub cancellation: CancellationFlag,
    pub run_config: serde_yaml::Value,
}

impl RunContext {
    pub fn new(
        root_config: RootConfig,
        registry: Arc<Registry>,
        destination_root: impl Into<PathBuf>,
    ) -> Self {
        RunContext {
            root_config,
            registry,
            destination_root: destination_root.into(),
            cancellation: CancellationFlag::new(),
            run_config: serde_yaml::Value::Null,
        }
    }

    pub fn destination_root(&self) -> &StdPath {
        &self.destination_root
    }

    /// Clones this context with `run_config` scoped to one sync entry,
    /// sharing the same registry and cancellation flag. The Run phase
    /// calls this once per entry in `root_config.syncs`.
    pub fn for_run_config(&self, run_config: serde_yaml::Value) -> RunContext {
        RunContext {
            root_config: self.root_config.clone(),
            registry: Arc::clone(&self.registry),
            destination_root: self.destination_root.clone(),
            cancellation: self.cancellation.clone(),
            run_config,
        }
    }
}
