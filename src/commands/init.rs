//! # Init Command Implementation
//!
//! This module implements the `init` subcommand, which scaffolds a starting
//! root config at the preferred config path.
//!
//! Grounded on the teacher's `commands/init.rs` (the exists-check + --force
//! override, emoji-prefixed status lines), stripped of the interactive
//! repository-URI wizard since this crate's sync entries have no registry
//! to query for starting values.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use syncdrift::defaults;

/// Scaffold a starting root config
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project root to scaffold the config under.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Overwrite an existing config file.
    #[arg(short, long)]
    pub force: bool,
}

pub fn execute(args: InitArgs) -> Result<()> {
    let config_path = args.root.join(defaults::PREFERRED_CONFIG_PATH);

    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Configuration file '{}' already exists. Use --force to overwrite.",
            config_path.display()
        ));
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&config_path, defaults::scaffold_config())?;

    println!("✅ Created {}", config_path.display());
    println!("💡 Run `syncdrift plan` to preview changes, then `syncdrift apply` to write them");

    Ok(())
}
