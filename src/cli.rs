//! # CLI Argument Parsing and Command Dispatch
//!
//! This module defines the command-line interface for the `syncdrift` tool
//! using the `clap` library. It is responsible for:
//!
//! - Defining the top-level CLI structure, including global arguments like
//!   `--color` and `--log-level`.
//! - Defining the available subcommands (`plan`, `apply`, `validate`, `init`,
//!   `completions`, `info`).
//! - Parsing the command-line arguments provided by the user.
//! - Dispatching to the appropriate command implementation based on the
//!   parsed arguments.
//!
//! Each subcommand is implemented in its own module under `src/commands/` to
//! keep the code organized and maintainable.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

use crate::commands;

/// syncdrift - materialize a working tree from declarative generator configs
#[derive(Parser, Debug)]
#[command(name = "syncdrift")]
#[command(
    version,
    about,
    long_about = "syncdrift - materialize a working tree from declarative generator configs"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,

    /// Increase output verbosity (can be repeated: --verbose --verbose)
    ///
    /// Overrides --log-level when specified:
    ///   --verbose       = debug level
    ///   --verbose -v    = trace level (combines with command -v flags)
    #[arg(long, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Suppress output except errors
    ///
    /// Overrides --log-level to show only error messages.
    /// Use for scripting or quiet operation.
    #[arg(long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the diff that `apply` would make, without touching disk
    Plan(commands::plan::PlanArgs),

    /// Run Setup, Run, Merge, Load, Diff, then write the result to disk
    Apply(commands::apply::ApplyArgs),

    /// Parse and validate a root config without running any generator
    Validate(commands::validate::ValidateArgs),

    /// Scaffold a starting root config
    Init(commands::init::InitArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),

    /// Show the discovered config path and registered generators
    Info(commands::info::InfoArgs),
}

impl Cli {
    /// Execute the parsed CLI command
    pub fn execute(self) -> Result<()> {
        // Initialize logger based on log level
        self.init_logger()?;

        match self.command {
            Commands::Plan(args) => {
                // `plan` exits 1 when changes are detected and
                // --exit-code-on-change is set, following diff(1)'s convention.
                match commands::plan::execute(args) {
                    Ok(()) => Ok(()),
                    Err(e) if e.to_string() == commands::plan::CHANGES_DETECTED => {
                        std::process::exit(1);
                    }
                    Err(e) => Err(e),
                }
            }
            Commands::Apply(args) => commands::apply::execute(args),
            Commands::Validate(args) => commands::validate::execute(args, &self.color),
            Commands::Init(args) => commands::init::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
            Commands::Info(args) => commands::info::execute(args),
        }
    }

    /// Initialize the logger with the specified log level and color settings
    fn init_logger(&self) -> Result<()> {
        let log_level = self.parse_log_level()?;
        let use_color = self.should_use_color();

        env_logger::Builder::from_default_env()
            .filter_level(log_level)
            .write_style(if use_color {
                env_logger::WriteStyle::Auto
            } else {
                env_logger::WriteStyle::Never
            })
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

        Ok(())
    }

    /// Parse the log level, considering --verbose and --quiet flags
    ///
    /// Priority order:
    /// 1. --quiet (always sets to Error level)
    /// 2. --verbose (sets Debug for 1, Trace for 2+)
    /// 3. --log-level (explicit level)
    fn parse_log_level(&self) -> Result<LevelFilter> {
        // --quiet takes precedence: minimal output
        if self.quiet {
            return Ok(LevelFilter::Error);
        }

        // --verbose overrides --log-level
        if self.verbose > 0 {
            return Ok(match self.verbose {
                1 => LevelFilter::Debug,
                _ => LevelFilter::Trace, // 2+ means trace
            });
        }

        // Fall back to explicit --log-level
        match self.log_level.to_lowercase().as_str() {
            "error" => Ok(LevelFilter::Error),
            "warn" => Ok(LevelFilter::Warn),
            "info" => Ok(LevelFilter::Info),
            "debug" => Ok(LevelFilter::Debug),
            "trace" => Ok(LevelFilter::Trace),
            "off" => Ok(LevelFilter::Off),
            _ => Err(anyhow::anyhow!(
                "Invalid log level: '{}'. Valid options are: error, warn, info, debug, trace, off",
                self.log_level
            )),
        }
    }

    /// Determine whether to use color output based on the color setting
    fn should_use_color(&self) -> bool {
        match self.color.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            "auto" => console::Term::stdout().features().colors_supported(),
            _ => {
                // Default to auto if invalid value provided
                eprintln!(
                    "Warning: Invalid color option '{}', using 'auto'. Valid options are: always, never, auto",
                    self.color
                );
                console::Term::stdout().features().colors_supported()
            }
        }
    }
}
