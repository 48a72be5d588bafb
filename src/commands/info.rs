//! # Info Command Implementation
//!
//! This module implements the `info` subcommand, which displays the
//! discovered config path and a breakdown of registered sync entries by
//! generator kind.
//!
//! Grounded on the teacher's `commands/info.rs` (operation-count-by-type
//! summary shape), retargeted from `config::Operation` variants onto
//! `SyncEntry::logic` kinds and `RootConfig.logic`/`children` sources.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use syncdrift::config;

/// Show the discovered config path and registered generators
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Project root to discover `.syncer/config.yaml` / `.syncer.yaml` under.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,
}

pub fn execute(args: InfoArgs) -> Result<()> {
    let config_path = config::find_config_file(&args.root).map_err(|e| {
        anyhow::anyhow!(
            "Failed to discover a config file under {}: {}",
            args.root.display(),
            e
        )
    })?;
    println!("📋 Configuration: {}", config_path.display());

    let root_config = config::load(&args.root)?;

    println!("\nSchema version: {}", root_config.version);

    println!("\nLogic sources: {}", root_config.logic.len());
    for source in &root_config.logic {
        println!("  • {}", source.source);
    }

    println!("\nChild sources: {}", root_config.children.len());
    for source in &root_config.children {
        println!("  • {}", source.source);
    }

    let mut by_kind: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in &root_config.syncs {
        *by_kind.entry(entry.logic.as_str()).or_insert(0) += 1;
    }

    println!("\nSync entries: {}", root_config.syncs.len());
    for (logic, count) in &by_kind {
        println!("  • {count} x {logic}");
    }

    for entry in &root_config.syncs {
        println!("    - {} ({})", entry.label(), entry.logic);
    }

    Ok(())
}
