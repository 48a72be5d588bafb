//! # StaticFileGenerator
//!
//! Emits exactly one file with fixed content. Grounded on
//! `original_source/sharedapi/drift/staticfile/staticfile.go`'s `Syncer`:
//! decode `{filename, content}`, write it, done. The Go original hardcodes
//! mode `0644`; this generator exposes an optional `mode` field since
//! `FileState` already carries a mode and the config decoder is free to
//! default it the same way.
//!
//! Stateless: config is decoded fresh from `RunContext::run_config` on
//! every `run`, so one registered instance serves every sync entry naming
//! this kind, each with its own `filename`/`content`.

use serde::{Deserialize, Serialize};

use crate::context::RunContext;
use crate::error::{Error, Result};
use crate::filesystem::FileSystemMap;
use crate::path::Path;
use crate::registry::{priority, Generator};
use crate::state::{FileState, StateWithChangeReason};

const DEFAULT_MODE: u32 = 0o644;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticFileConfig {
    pub filename: String,
    pub content: String,
    #[serde(default)]
    pub mode: Option<u32>,
}

pub struct StaticFileGenerator;

impl StaticFileGenerator {
    pub const fn name() -> &'static str {
        "staticfile"
    }

    pub fn new() -> Self {
        StaticFileGenerator
    }

    /// Decodes a sync entry's opaque config subtree into `StaticFileConfig`.
    fn decode(run_config: &serde_yaml::Value) -> Result<StaticFileConfig> {
        let config: StaticFileConfig =
            serde_yaml::from_value(run_config.clone()).map_err(|e| Error::DecodeFailed {
                name: Self::name().to_string(),
                message: e.to_string(),
            })?;
        if config.filename.is_empty() {
            return Err(Error::DecodeFailed {
                name: Self::name().to_string(),
                message: "filename is required".to_string(),
            });
        }
        Ok(config)
    }
}

impl Default for StaticFileGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for StaticFileGenerator {
    fn name(&self) -> &str {
        Self::name()
    }

    fn priority(&self) -> i32 {
        priority::NORMAL
    }

    fn validate_config(&self, run_config: &serde_yaml::Value) -> Result<()> {
        Self::decode(run_config).map(|_| ())
    }

    fn run(&self, ctx: &RunContext) -> Result<FileSystemMap<StateWithChangeReason>> {
        let config = Self::decode(&ctx.run_config)?;
        let path = Path::new(&config.filename)?;
        let mode = config.mode.unwrap_or(DEFAULT_MODE);
        let state = FileState::present(config.content.into_bytes(), mode);

        let mut result = FileSystemMap::new();
        result.add(
            path,
            StateWithChangeReason::new(state, format!("{} generator", Self::name())),
        )?;
        Ok(result)
    }
}
