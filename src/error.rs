//! # Error Handling
//!
//! This module defines the centralized error type for `syncdrift`. It uses
//! `thiserror` to build a single `Error` enum covering every failure mode of
//! the drift pipeline: configuration discovery and parsing, registry and
//! mutator wiring, planning, diffing, and applying.
//!
//! Each variant carries the structured context needed to produce a useful
//! diagnostic (the path, generator name, or offending value involved), rather
//! than a bare string.

use thiserror::Error;

use crate::path::Path;

/// Main error type for syncdrift operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No `.syncer/config.yaml` or `.syncer.yaml` could be found under the
    /// given root.
    #[error("no config file found under {root}: tried {tried:?}")]
    ConfigNotFound { root: String, tried: Vec<String> },

    /// The config file exists but failed to parse as YAML, or failed schema
    /// validation.
    #[error("invalid configuration: {message}")]
    ConfigInvalid { message: String },

    /// `version` in the root config is not the one supported version.
    #[error("unsupported config version: {found} (expected {expected})")]
    ConfigVersionUnsupported { found: i64, expected: i64 },

    /// A sync entry names a generator absent from the registry.
    #[error("unknown generator: {name}")]
    UnknownGenerator { name: String },

    /// Two generators were registered under the same name.
    #[error("generator already registered: {name}")]
    GeneratorAlreadyRegistered { name: String },

    /// Two generators both produced a state for the same path.
    #[error("conflicting generators for path {path}: {left} vs {right}")]
    ConflictingGenerators {
        path: String,
        left: String,
        right: String,
    },

    /// A generator's `Setup` step returned an error.
    #[error("generator {name} failed during setup: {source}")]
    GeneratorSetupFailed {
        name: String,
        #[source]
        source: Box<Error>,
    },

    /// A generator's `Run` step returned an error.
    #[error("generator {name} failed during run: {source}")]
    GeneratorRunFailed {
        name: String,
        #[source]
        source: Box<Error>,
    },

    /// A generator could not decode its config subtree.
    #[error("failed to decode config for generator {name}: {message}")]
    DecodeFailed { name: String, message: String },

    /// An internal invariant was violated while building a `Diff`. This
    /// indicates a bug in the planner, not a user error.
    #[error("internal diff validation failure for {path}: {message}")]
    DiffValidationFailed { path: String, message: String },

    /// `FileSystemMap::add` was called with an empty path.
    #[error("path cannot be empty")]
    EmptyPath,

    /// `FileSystemMap::add` was called with a path already present.
    #[error("path already present: {path}")]
    AlreadyPresent { path: String },

    /// A value failed its own validation before being added to a map.
    #[error("invalid value for {path}: {message}")]
    InvalidValue { path: String, message: String },

    /// An I/O failure during Apply.
    #[error("executor failed for {path}: {source}")]
    ExecutorFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// `SectionParser` found a start marker with no matching end marker.
    #[error("unterminated autogenerated section in {path}")]
    UnterminatedSection { path: String },

    /// `add_mutator` was called against a generator that does not implement
    /// `Mutatable<T>` for the requested `T`.
    #[error("generator {name} is not mutatable for this config type")]
    NotMutatable { name: String },

    /// A mutator returned an error while transforming a config value.
    #[error("mutator failed for generator {name}: {message}")]
    MutatorFailed { name: String, message: String },

    /// `add_mutator` was called after the Setup phase has completed.
    #[error("cannot add mutator to {name}: mutator list is locked after setup")]
    MutatorsLocked { name: String },

    /// Cancellation was observed between generator invocations.
    #[error("operation cancelled")]
    Cancelled,

    /// A plain I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A handlebars template parse error, surfaced eagerly at generator
    /// construction.
    #[error("template parse error: {0}")]
    TemplateParse(#[from] Box<handlebars::TemplateError>),

    /// A handlebars render error, surfaced when a generator's `Run` step
    /// fails.
    #[error("template render error: {0}")]
    TemplateRender(#[from] Box<handlebars::RenderError>),
}

impl Error {
    /// Convenience constructor for `AlreadyPresent` from a typed `Path`.
    pub fn already_present(path: &Path) -> Self {
        Error::AlreadyPresent {
            path: path.as_str().to_string(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
