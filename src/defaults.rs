//! Default values shared across commands.
//!
//! This module centralizes constants the CLI and config loader both need,
//! avoiding duplication between `commands/init.rs` (which scaffolds a
//! config at the preferred location) and `config.rs` (which discovers one).

/// The config path `init` scaffolds and `plan`/`apply`/`validate` look for
/// first.
pub const PREFERRED_CONFIG_PATH: &str = ".syncer/config.yaml";

/// The flat fallback config path, kept for projects that don't want a
/// `.syncer/` directory.
pub const FALLBACK_CONFIG_PATH: &str = ".syncer.yaml";

/// A minimal config `init` writes for a new project.
pub fn scaffold_config() -> &'static str {
    "version: 1\nsyncs: []\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaffold_config_is_valid_minimal_yaml() {
        let parsed = crate::config::RootConfig::parse(scaffold_config()).unwrap();
        assert_eq!(parsed.version, 1);
        assert!(parsed.syncs.is_empty());
    }
}
