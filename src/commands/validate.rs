//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which parses a root
//! config and decodes every sync entry's config against its generator's
//! schema, without running Setup/Run/Diff or touching disk.
//!
//! Grounded on the teacher's `commands/validate.rs` (the emoji/summary
//! reporting style via `output::{OutputConfig, emoji}`), retargeted from
//! cycle detection + regex/glob pattern checks onto per-entry generator
//! config validation via `Generator::validate_config`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use syncdrift::config;
use syncdrift::generators;
use syncdrift::io::{PosixStateLoader, StateLoader};
use syncdrift::output::{emoji, OutputConfig};

/// Parse and validate a root config without running any generator
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Project root to discover `.syncer/config.yaml` / `.syncer.yaml` under.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,
}

pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    println!(
        "{} Validating configuration under {}",
        emoji(&out, "🔍", "[SCAN]"),
        args.root.display()
    );

    let root_config = match config::load(&args.root) {
        Ok(c) => {
            println!(
                "{} Configuration file parsed successfully",
                emoji(&out, "✅", "[OK]")
            );
            c
        }
        Err(e) => {
            println!(
                "{} Configuration parsing failed: {}",
                emoji(&out, "❌", "[ERR]"),
                e
            );
            return Err(anyhow::anyhow!("Configuration parsing failed: {e}"));
        }
    };

    println!("\n{} Configuration Summary:", emoji(&out, "📊", "[INFO]"));
    println!("   Schema version: {}", root_config.version);
    println!("   Sync entries: {}", root_config.syncs.len());
    println!("   Logic sources: {}", root_config.logic.len());
    println!("   Child sources: {}", root_config.children.len());

    println!(
        "\n{} Validating sync entries...",
        emoji(&out, "🔍", "[SCAN]")
    );

    let loader: Arc<dyn StateLoader> = Arc::new(PosixStateLoader::new(&args.root));
    let mut has_errors = false;

    for (idx, entry) in root_config.syncs.iter().enumerate() {
        match generators::build(&entry.logic, loader.clone())
            .and_then(|generator| generator.validate_config(&entry.config))
        {
            Ok(()) => {
                println!(
                    "{} [{idx}] {} ({}): ok",
                    emoji(&out, "✅", "[OK]"),
                    entry.label(),
                    entry.logic
                );
            }
            Err(e) => {
                println!(
                    "{} [{idx}] {} ({}): {}",
                    emoji(&out, "❌", "[ERR]"),
                    entry.label(),
                    entry.logic,
                    e
                );
                has_errors = true;
            }
        }
    }

    if has_errors {
        println!("\n{} Validation failed", emoji(&out, "❌", "[ERR]"));
        return Err(anyhow::anyhow!("one or more sync entries failed validation"));
    }

    println!("\n{} Validation passed", emoji(&out, "✅", "[OK]"));
    Ok(())
}
