//! Implementation of the 6 phases of a Plan/Apply run (`spec.md` §4.6):
//!
//! 1. Setup pass over sync entries in registry order.
//! 2. Run pass, collecting each generator's desired-state contribution.
//! 3. Merge pass (`SystemMerge`), failing on path collisions.
//! 4. Load pass: actual on-disk state for exactly the desired path union.
//! 5. Compute-diff pass.
//! 6. Apply pass (only for `apply`, not `plan`) — see `apply::Applier`.
//!
//! Mirrors the teacher's `phases/` directory-per-phase layout and its
//! `orchestrator.rs` sequential-call shape, with entirely new semantics.

pub mod apply;
pub mod compute_diff;
pub mod load;
pub mod merge;
pub mod orchestrator;
pub mod run;
pub mod setup;

pub use apply::Applier;
pub use orchestrator::Planner;
