//! # SectionMergeGenerator
//!
//! Rewrites only the autogenerated region of an existing file, leaving
//! user edits outside the markers untouched. This is the third built-in
//! generator kind named in `spec.md` §1's overview ("file-section
//! mergers") but never detailed in §4; its shape is grounded directly in
//! `original_source/sharedapi/files/existingfileparser/parser.go`.
//!
//! Unlike the other built-ins, this generator needs to read the file it is
//! about to rewrite, so it is constructed with its own `StateLoader`
//! handle rather than receiving one through `RunContext`.
//!
//! Stateless beyond that loader handle: `target`/`autogen_content` are
//! decoded fresh from `RunContext::run_config` on every `run`, so one
//! registered instance can merge into several distinct target files, one
//! per sync entry naming this kind.

use std::cell::RefCell;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::context::RunContext;
use crate::error::{Error, Result};
use crate::filesystem::FileSystemMap;
use crate::io::StateLoader;
use crate::mutator::MutatorList;
use crate::path::Path;
use crate::registry::{priority, Generator};
use crate::section_parser::{self, ParseConfig, RECOMMENDED_SECTION_END, RECOMMENDED_SECTION_START};
use crate::state::{FileState, StateWithChangeReason};

const DEFAULT_MODE: u32 = 0o644;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMergeConfig {
    pub target: String,
    pub autogen_content: String,
}

pub struct SectionMergeGenerator {
    loader: Arc<dyn StateLoader>,
    mutators: RefCell<MutatorList<SectionMergeConfig>>,
}

impl SectionMergeGenerator {
    pub const fn name() -> &'static str {
        "section_merge"
    }

    pub fn new(loader: Arc<dyn StateLoader>) -> Self {
        SectionMergeGenerator {
            loader,
            mutators: RefCell::new(MutatorList::new()),
        }
    }

    /// Decodes a sync entry's opaque config subtree into `SectionMergeConfig`.
    fn decode(run_config: &serde_yaml::Value) -> Result<SectionMergeConfig> {
        let config: SectionMergeConfig =
            serde_yaml::from_value(run_config.clone()).map_err(|e| Error::DecodeFailed {
                name: Self::name().to_string(),
                message: e.to_string(),
            })?;
        if config.target.is_empty() {
            return Err(Error::DecodeFailed {
                name: Self::name().to_string(),
                message: "target is required".to_string(),
            });
        }
        Ok(config)
    }
}

impl Generator for SectionMergeGenerator {
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
        let mut config = Self::decode(&ctx.run_config)?;
        self.mutators.borrow().apply(&mut config)?;

        let path = Path::new(&config.target)?;
        let existing = self.loader.load(&path)?;
        let contents = String::from_utf8_lossy(&existing.contents).into_owned();

        let parsed = section_parser::parse(path.as_str(), &contents, &ParseConfig::recommended())?;

        let new_autogen = format!(
            "{}\n{}\n{}",
            RECOMMENDED_SECTION_START,
            config.autogen_content.trim(),
            RECOMMENDED_SECTION_END
        );

        let joined = if parsed.has_section() {
            [parsed.pre_autogen.as_str(), new_autogen.as_str(), parsed.post_autogen.as_str()]
                .iter()
                .filter(|s| !s.is_empty())
                .cloned()
                .collect::<Vec<_>>()
                .join("\n")
        } else if parsed.post_autogen.is_empty() {
            new_autogen.clone()
        } else {
            format!("{}\n{}", parsed.post_autogen, new_autogen)
        };

        let mode = if existing.is_present() {
            existing.mode
        } else {
            DEFAULT_MODE
        };

        let mut result = FileSystemMap::new();
        result.add(
            path,
            StateWithChangeReason::new(
                FileState::present(joined.into_bytes(), mode),
                format!("{} generator", Self::name()),
            ),
        )?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::PosixStateLoader;
    use tempfile::TempDir;

    fn config(yaml: &str) -> serde_yaml::Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn ctx_with(run_config: serde_yaml::Value) -> RunContext {
        RunContext::new(
            crate::config::RootConfig {
                version: 1,
                logic: vec![],
                children: vec![],
                syncs: vec![],
            },
            std::sync::Arc::new(crate::registry::Registry::new(vec![]).unwrap()),
            ".",
        )
        .for_run_config(run_config)
    }

    #[test]
    fn test_appends_section_when_file_has_none() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("README.md"), "# Project\n\nHand-written notes.").unwrap();
        let loader: Arc<dyn StateLoader> = Arc::new(PosixStateLoader::new(dir.path()));
        let generator = SectionMergeGenerator::new(loader);

        let map = generator
            .run(&ctx_with(config(
                "target: README.md\nautogen_content: \"generated line\"\n",
            )))
            .unwrap();
        let entry = map.get(&Path::new("README.md").unwrap()).unwrap();
        let text = String::from_utf8(entry.state.contents.clone()).unwrap();
        assert!(text.contains("Hand-written notes."));
        assert!(text.contains("generated line"));
        assert!(text.contains(RECOMMENDED_SECTION_START));
    }

    #[test]
    fn test_replaces_existing_section_preserving_surroundings() {
        let dir = TempDir::new().unwrap();
        let existing = format!(
            "keep before\n{}\nold generated\n{}\nkeep after",
            RECOMMENDED_SECTION_START, RECOMMENDED_SECTION_END
        );
        std::fs::write(dir.path().join("f.txt"), &existing).unwrap();
        let loader: Arc<dyn StateLoader> = Arc::new(PosixStateLoader::new(dir.path()));
        let generator = SectionMergeGenerator::new(loader);

        let map = generator
            .run(&ctx_with(config(
                "target: f.txt\nautogen_content: \"new generated\"\n",
            )))
            .unwrap();
        let entry = map.get(&Path::new("f.txt").unwrap()).unwrap();
        let text = String::from_utf8(entry.state.contents.clone()).unwrap();
        assert!(text.contains("keep before"));
        assert!(text.contains("keep after"));
        assert!(text.contains("new generated"));
        assert!(!text.contains("old generated"));
    }

    #[test]
    fn test_empty_target_is_rejected() {
        let loader: Arc<dyn StateLoader> = Arc::new(PosixStateLoader::new("."));
        let generator = SectionMergeGenerator::new(loader);
        let err = generator
            .run(&ctx_with(config("target: \"\"\nautogen_content: x\n")))
            .unwrap_err();
        assert!(matches!(err, Error::DecodeFailed { .. }));
    }

    #[test]
    fn test_validate_config_rejects_missing_target() {
        let loader: Arc<dyn StateLoader> = Arc::new(PosixStateLoader::new("."));
        let generator = SectionMergeGenerator::new(loader);
        let err = generator
            .validate_config(&config("target: \"\"\nautogen_content: x\n"))
            .unwrap_err();
        assert!(matches!(err, Error::DecodeFailed { .. }));
    }

    #[test]
    fn test_unterminated_existing_section_is_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("f.txt"),
            format!("before\n{}\nno end marker here", RECOMMENDED_SECTION_START),
        )
        .unwrap();
        let loader: Arc<dyn StateLoader> = Arc::new(PosixStateLoader::new(dir.path()));
        let generator = SectionMergeGenerator::new(loader);

        let err = generator
            .run(&ctx_with(config("target: f.txt\nautogen_content: x\n")))
            .unwrap_err();
        assert!(matches!(err, Error::UnterminatedSection { .. }));
    }

    #[test]
    fn test_same_instance_merges_two_distinct_targets() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.txt"), "a before").unwrap();
        std::fs::write(dir.path().join("b.txt"), "b before").unwrap();
        let loader: Arc<dyn StateLoader> = Arc::new(PosixStateLoader::new(dir.path()));
        let generator = SectionMergeGenerator::new(loader);

        let a = generator
            .run(&ctx_with(config("target: a.txt\nautogen_content: gen-a\n")))
            .unwrap();
        let b = generator
            .run(&ctx_with(config("target: b.txt\nautogen_content: gen-b\n")))
            .unwrap();

        let a_text = String::from_utf8(a.get(&Path::new("a.txt").unwrap()).unwrap().state.contents.clone()).unwrap();
        let b_text = String::from_utf8(b.get(&Path::new("b.txt").unwrap()).unwrap().state.contents.clone()).unwrap();
        assert!(a_text.contains("gen-a"));
        assert!(b_text.contains("gen-b"));
    }
}
