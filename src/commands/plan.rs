//! # Plan Command Implementation
//!
//! This module implements the `plan` subcommand: it runs phases 1-5 of the
//! pipeline (Setup, Run, Merge, Load, Compute-diff) and reports what `apply`
//! would do, without writing anything to disk.
//!
//! Grounded on the teacher's `commands/diff.rs` (change categorization,
//! `--summary` flag, the `CHANGES_DETECTED` exit-code convention), rewired
//! onto `phases::Planner` and `DiffAction` instead of the teacher's
//! `MemoryFS`/working-directory comparison.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use syncdrift::config;
use syncdrift::context::RunContext;
use syncdrift::filesystem::FileSystemMap;
use syncdrift::generators;
use syncdrift::io::{PosixStateLoader, StateLoader};
use syncdrift::path::Path;
use syncdrift::phases::Planner;
use syncdrift::state::{DiffAction, DiffWithChangeReason};
use syncdrift::suggestions;

/// Sentinel error text the CLI layer matches on to translate "changes
/// exist" into exit code 1, following the convention of `diff(1)`.
pub const CHANGES_DETECTED: &str = "CHANGES_DETECTED";

/// Show the diff that `apply` would make
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Project root to discover `.syncer/config.yaml` / `.syncer.yaml` under.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Show only a summary without listing individual files.
    #[arg(long)]
    pub summary: bool,

    /// Exit with code 1 if any change is detected (no changes exits 0).
    #[arg(long)]
    pub exit_code_on_change: bool,
}

pub fn execute(args: PlanArgs) -> Result<()> {
    let root_config = config::load(&args.root)
        .map_err(|_| suggestions::config_not_found(&args.root, &known_candidates()))?;

    let loader: Arc<dyn StateLoader> = Arc::new(PosixStateLoader::new(&args.root));
    let registry = generators::build_registry(&root_config.syncs, loader.clone())
        .map_err(map_registry_error)?;
    let ctx = RunContext::new(root_config, Arc::new(registry), &args.root);

    let planner = Planner::new(loader.as_ref());
    let diffs = planner.plan(&ctx)?;

    report(&diffs, args.summary);

    if args.exit_code_on_change && has_changes(&diffs) {
        return Err(anyhow::anyhow!(CHANGES_DETECTED));
    }
    Ok(())
}

fn known_candidates() -> Vec<String> {
    vec![
        syncdrift::defaults::PREFERRED_CONFIG_PATH.to_string(),
        syncdrift::defaults::FALLBACK_CONFIG_PATH.to_string(),
    ]
}

fn map_registry_error(e: syncdrift::error::Error) -> anyhow::Error {
    if let syncdrift::error::Error::UnknownGenerator { name } = &e {
        return suggestions::unknown_generator(name, generators::BUILTIN_NAMES);
    }
    e.into()
}

fn has_changes(diffs: &FileSystemMap<DiffWithChangeReason>) -> bool {
    diffs
        .iter()
        .any(|(_, d)| !matches!(d.diff.action, DiffAction::NoChange))
}

fn report(diffs: &FileSystemMap<DiffWithChangeReason>, summary_only: bool) {
    let mut paths: Vec<&Path> = diffs.paths().iter().collect();
    paths.sort();

    let mut created = Vec::new();
    let mut updated = Vec::new();
    let mut deleted = Vec::new();

    for path in &paths {
        let entry = diffs.get(path).expect("path came from paths()");
        match entry.diff.action {
            DiffAction::Create => created.push(*path),
            DiffAction::Update => updated.push(*path),
            DiffAction::Delete => deleted.push(*path),
            DiffAction::NoChange => {}
        }
    }

    if created.is_empty() && updated.is_empty() && deleted.is_empty() {
        println!("No changes detected.");
        return;
    }

    if summary_only {
        println!("Changes detected:");
        if !created.is_empty() {
            println!("  {} file(s) would be created", created.len());
        }
        if !updated.is_empty() {
            println!("  {} file(s) would be updated", updated.len());
        }
        if !deleted.is_empty() {
            println!("  {} file(s) would be deleted", deleted.len());
        }
        return;
    }

    if !created.is_empty() {
        println!("Files to create:");
        for path in &created {
            println!("  + {path}");
        }
    }
    if !updated.is_empty() {
        println!("Files to update:");
        for path in &updated {
            println!("  ~ {path}");
        }
    }
    if !deleted.is_empty() {
        println!("Files to delete:");
        for path in &deleted {
            println!("  - {path}");
        }
    }
    println!(
        "Summary: {} created, {} updated, {} deleted",
        created.len(),
        updated.len(),
        deleted.len()
    );
}
