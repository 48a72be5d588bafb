//! # Boundary Interfaces
//!
//! `StateLoader` and `DiffExecutor` are the two boundary traits between the
//! pure in-memory pipeline and the real filesystem (`spec.md` §4.2, §6).
//! Swapping the default POSIX-backed implementation for a virtual/in-memory
//! one (as the teacher's `filesystem.rs::MemoryFS` does for its own pipeline)
//! lets the planner be exercised without touching disk.

pub mod executor;
pub mod loader;

pub use executor::{DiffExecutor, PosixDiffExecutor};
pub use loader::{PosixStateLoader, StateLoader};
