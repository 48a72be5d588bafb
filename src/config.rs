//! # Root Configuration
//!
//! Defines `RootConfig`, the schema for `.syncer/config.yaml` /
//! `.syncer.yaml`, and the discovery + parsing logic that turns a project
//! root into a loaded config.
//!
//! Grounded on `original_source/sharedapi/syncer/config.go`
//! (`RootConfig`, `DefaultConfigLoader.findConfigFile`/`LoadConfig`), kept
//! to the same two candidate filenames and the same "first existing wins"
//! discovery order.

use std::path::Path as StdPath;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The only root config schema version this crate understands.
pub const SUPPORTED_VERSION: i64 = 1;

/// Candidate config file locations, checked in order, relative to a project
/// root.
const CANDIDATE_PATHS: &[&str] = &[".syncer/config.yaml", ".syncer.yaml"];

/// A `logic`/`children` entry. Advisory only: the core never reads these
/// beyond surfacing them to `info`/`validate` (`spec.md` §6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicSource {
    pub source: String,
}

/// One entry in `syncs`: a named invocation of a registered generator with
/// an opaque config subtree forwarded to that generator's decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncEntry {
    /// Optional human-readable label for diagnostics; defaults to `logic`.
    #[serde(default)]
    pub name: Option<String>,
    /// The registered generator name this entry invokes.
    pub logic: String,
    /// Opaque subtree forwarded verbatim to the generator's decoder.
    #[serde(default)]
    pub config: serde_yaml::Value,
}

impl SyncEntry {
    /// The label to use in diagnostics: `name` if set, else `logic`.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.logic)
    }
}

/// The parsed root configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootConfig {
    pub version: i64,
    #[serde(default)]
    pub logic: Vec<LogicSource>,
    #[serde(default)]
    pub children: Vec<LogicSource>,
    #[serde(default)]
    pub syncs: Vec<SyncEntry>,
}

impl RootConfig {
    /// Parses a `RootConfig` from YAML text and checks its version.
    pub fn parse(yaml_content: &str) -> Result<Self> {
        let config: RootConfig = serde_yaml::from_str(yaml_content)?;
        if config.version != SUPPORTED_VERSION {
            return Err(Error::ConfigVersionUnsupported {
                found: config.version,
                expected: SUPPORTED_VERSION,
            });
        }
        Ok(config)
    }
}

/// Finds the first candidate config file under `root`, in declaration
/// order.
pub fn find_config_file(root: &StdPath) -> Result<std::path::PathBuf> {
    for candidate in CANDIDATE_PATHS {
        let path = root.join(candidate);
        if path.is_file() {
            return Ok(path);
        }
    }
    Err(Error::ConfigNotFound {
        root: root.display().to_string(),
        tried: CANDIDATE_PATHS.iter().map(|s| s.to_string()).collect(),
    })
}

/// Discovers and loads the root config under `root`.
pub fn load(root: &StdPath) -> Result<RootConfig> {
    let path = find_config_file(root)?;
    let content = std::fs::read_to_string(&path)?;
    RootConfig::parse(&content)
}
