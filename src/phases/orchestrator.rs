//! Planner: ties the six phases together into `plan()`.
//!
//! Grounded on the teacher's `phases/orchestrator.rs::execute_pull` shape —
//! sequential phase calls, `?` propagation, no phase peeks at a later
//! phase's state.

use log::info;

use super::{compute_diff, load, merge, run, setup};
use crate::context::RunContext;
use crate::error::Result;
use crate::filesystem::FileSystemMap;
use crate::io::StateLoader;
use crate::state::DiffWithChangeReason;

pub struct Planner<'a> {
    loader: &'a dyn StateLoader,
}

impl<'a> Planner<'a> {
    pub fn new(loader: &'a dyn StateLoader) -> Self {
        Planner { loader }
    }

    /// Runs phases 1-5 (Setup, Run, Merge, Load, Compute-diff) and returns
    /// the resulting diff map. Does not touch disk beyond reading existing
    /// state via the injected `StateLoader` — applying the diff is a
    /// separate step (`phases::Applier`).
    pub fn plan(&self, ctx: &RunContext) -> Result<FileSystemMap<DiffWithChangeReason>> {
        info!("starting plan");

        setup::execute(ctx)?;
        let per_generator = run::execute(ctx)?;
        let desired = merge::execute(per_generator)?;
        let existing = load::execute(self.loader, &desired)?;
        let diffs = compute_diff::execute(&existing, &desired)?;

        info!("plan complete: {} paths considered", diffs.len());
        Ok(diffs)
    }
}
