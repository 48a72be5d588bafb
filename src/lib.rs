//! # syncdrift
//!
//! A declarative drift sync engine: it materializes a working tree from a
//! set of named generator configs, computing the same plan/apply diff a
//! configuration management tool would, but for arbitrary generated files
//! instead of system packages.
//!
//! ## Core concepts
//!
//! - **Configuration (`config`)**: the schema for `.syncer/config.yaml` /
//!   `.syncer.yaml` — a `version`, advisory `logic`/`children` sources, and
//!   the `syncs` list the core actually consumes.
//! - **Data model (`path`, `state`, `filesystem`)**: `Path`, `FileState`,
//!   and the ordered `FileSystemMap<T>` that both desired and existing file
//!   trees are expressed in.
//! - **Generators (`registry`, `mutator`, `generators`)**: the unit of
//!   work. `Registry` holds the fixed generator set for a run; `mutator`
//!   lets one generator's `Setup` step adjust another's decoded config;
//!   `generators` ships three built-ins (`static_file`, `section_merger`,
//!   `template_renderer`).
//! - **Planning (`diff`, `io`, `phases`)**: `phases` runs the six-step
//!   Setup → Run → Merge → Load → Diff pipeline (`phases::Planner`) and the
//!   Apply step (`phases::Applier`), built on the `io` boundary traits
//!   (`StateLoader`, `DiffExecutor`) and the `diff` comparison table.
//! - **CLI**: the `syncdrift` binary's `cli`/`commands` modules (not part of
//!   this library) wire `plan`, `apply`, `validate`, `init`, `completions`,
//!   and `info` on top of the pieces below.
//!
//! ## Execution flow
//!
//! 1. Discover and parse the root config (`config::load`).
//! 2. Build a `Registry` of generators and a `RunContext`.
//! 3. `phases::Planner::plan` runs Setup, Run, Merge, Load, Compute-diff.
//! 4. `plan` reports the diff; `apply` additionally runs
//!    `phases::Applier::apply` to write it to disk.

pub mod config;
pub mod context;
pub mod defaults;
pub mod diff;
pub mod error;
pub mod filesystem;
pub mod generators;
pub mod io;
pub mod mutator;
pub mod output;
pub mod path;
pub mod phases;
pub mod registry;
pub mod section_parser;
pub mod state;
pub mod suggestions;
