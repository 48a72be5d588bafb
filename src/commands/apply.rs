//! # Apply Command Implementation
//!
//! This module implements the `apply` subcommand, which runs the full
//! six-phase pipeline (Setup, Run, Merge, Load, Compute-diff, then Apply)
//! and writes the result to disk.
//!
//! Grounded on the teacher's `commands/apply.rs` (argument shape, timing and
//! summary logging via `log`), rewired onto `phases::Planner` /
//! `phases::Applier` instead of the teacher's repository-fetch pipeline.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Args;

use syncdrift::config;
use syncdrift::context::RunContext;
use syncdrift::generators;
use syncdrift::io::{PosixDiffExecutor, PosixStateLoader, StateLoader};
use syncdrift::phases::{Applier, Planner};
use syncdrift::suggestions;

/// Run Setup, Run, Merge, Load, Diff, then write the result to disk
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Project root to discover `.syncer/config.yaml` / `.syncer.yaml` under,
    /// and the destination root files are written relative to.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Show what would be done without making any actual changes.
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

pub fn execute(args: ApplyArgs) -> Result<()> {
    let start_time = Instant::now();

    let root_config = config::load(&args.root).map_err(|_| {
        suggestions::config_not_found(
            &args.root,
            &[
                syncdrift::defaults::PREFERRED_CONFIG_PATH.to_string(),
                syncdrift::defaults::FALLBACK_CONFIG_PATH.to_string(),
            ],
        )
    })?;

    let loader: Arc<dyn StateLoader> = Arc::new(PosixStateLoader::new(&args.root));
    let registry = generators::build_registry(&root_config.syncs, loader.clone()).map_err(|e| {
        if let syncdrift::error::Error::UnknownGenerator { name } = &e {
            suggestions::unknown_generator(name, generators::BUILTIN_NAMES)
        } else {
            e.into()
        }
    })?;
    let ctx = RunContext::new(root_config, Arc::new(registry), &args.root);

    log::info!("planning sync for {}", args.root.display());
    let planner = Planner::new(loader.as_ref());
    let diffs = planner.plan(&ctx)?;

    if args.dry_run {
        log::info!("dry run: {} paths considered, nothing written", diffs.len());
        return Ok(());
    }

    let executor = PosixDiffExecutor::new(&args.root);
    let applier = Applier::new(&executor);
    applier.apply(&diffs)?;

    let duration = start_time.elapsed();
    log::info!(
        "applied {} paths in {:.2}s",
        diffs.len(),
        duration.as_secs_f64()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_execute_missing_config_is_error() {
        let dir = TempDir::new().unwrap();
        let args = ApplyArgs {
            root: dir.path().to_path_buf(),
            dry_run: false,
        };
        assert!(execute(args).is_err());
    }

    #[test]
    fn test_execute_writes_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".syncer.yaml"),
            "version: 1\nsyncs:\n  - logic: staticfile\n    config:\n        filename: out.txt\n        content: hello\n",
        )
        .unwrap();

        let args = ApplyArgs {
            root: dir.path().to_path_buf(),
            dry_run: false,
        };
        execute(args).unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("out.txt")).unwrap(),
            "hello"
        );
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".syncer.yaml"),
            "version: 1\nsyncs:\n  - logic: staticfile\n    config:\n        filename: out.txt\n        content: hello\n",
        )
        .unwrap();

        let args = ApplyArgs {
            root: dir.path().to_path_buf(),
            dry_run: true,
        };
        execute(args).unwrap();

        assert!(!dir.path().join("out.txt").exists());
    }

    #[test]
    fn test_execute_writes_both_files_for_duplicate_logic_entries() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".syncer.yaml"),
            "version: 1\nsyncs:\n  - name: readme\n    logic: staticfile\n    config:\n        filename: README.md\n        content: readme contents\n  - name: license\n    logic: staticfile\n    config:\n        filename: LICENSE\n        content: license contents\n",
        )
        .unwrap();

        let args = ApplyArgs {
            root: dir.path().to_path_buf(),
            dry_run: false,
        };
        execute(args).unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("README.md")).unwrap(),
            "readme contents"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("LICENSE")).unwrap(),
            "license contents"
        );
    }
}
