//! Shared test utilities for CLI end-to-end tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across `cli_e2e_*.rs` files.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_minimal_config();
//!     fixture.command().arg("plan").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Common root config YAML snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// Minimal valid config with no sync entries.
    pub const MINIMAL: &str = "version: 1\nsyncs: []\n";

    /// A config with a single `staticfile` sync entry.
    pub const STATIC_FILE: &str = r#"
version: 1
syncs:
  - logic: staticfile
    config:
      filename: hello.txt
      content: "hello from syncdrift\n"
"#;

    /// A config naming an unregistered generator.
    pub const UNKNOWN_GENERATOR: &str = r#"
version: 1
syncs:
  - logic: nonexistent_logic
    config: {}
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "invalid: yaml: content:";

    /// A config with an unsupported schema version.
    pub const UNSUPPORTED_VERSION: &str = "version: 99\nsyncs: []\n";
}

/// A test fixture that provides a temporary directory with an optional
/// `.syncer.yaml` root config.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `.syncer.yaml` root config with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child(".syncer.yaml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Add the minimal valid config (no sync entries).
    #[allow(dead_code)]
    pub fn with_minimal_config(self) -> Self {
        self.with_config(configs::MINIMAL)
    }

    /// Add a file with the given path and content.
    #[allow(dead_code)]
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the root config file.
    #[allow(dead_code)]
    pub fn config_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join(".syncer.yaml")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    /// Create a command configured to run the `syncdrift` binary in this
    /// fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("syncdrift");
        cmd.current_dir(self.path());
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_config() {
        let fixture = TestFixture::new().with_config(configs::MINIMAL);
        assert!(fixture.config_path().exists());
    }

    #[test]
    fn test_configs_are_valid_yaml_where_expected() {
        for config in [configs::MINIMAL, configs::STATIC_FILE, configs::UNKNOWN_GENERATOR] {
            serde_yaml::from_str::<serde_yaml::Value>(config).expect("config should be valid YAML");
        }
    }

    #[test]
    fn test_invalid_yaml_is_actually_invalid() {
        let result = serde_yaml::from_str::<serde_yaml::Value>(configs::INVALID_YAML);
        assert!(result.is_err(), "INVALID_YAML should not parse");
    }
}
