//! Phase 2: Run pass.
//!
//! Calls `Generator::run` once per sync entry in `root_config.syncs`,
//! declaration order, collecting each entry's desired-state contribution
//! keyed by its label so Phase 3 (merge) can report which entry owns a
//! conflicting path. Entries that share a `logic` kind invoke the same
//! registered generator with a distinct `RunContext::run_config` scoped to
//! that entry via `RunContext::for_run_config`.

use log::debug;

use crate::context::RunContext;
use crate::error::{Error, Result};
use crate::filesystem::FileSystemMap;
use crate::state::StateWithChangeReason;

pub fn execute(ctx: &RunContext) -> Result<Vec<(String, FileSystemMap<StateWithChangeReason>)>> {
    let mut results = Vec::with_capacity(ctx.root_config.syncs.len());
    for entry in &ctx.root_config.syncs {
        ctx.cancellation.check()?;
        let generator = ctx.registry.get(&entry.logic).ok_or_else(|| Error::UnknownGenerator {
            name: entry.logic.clone(),
        })?;
        debug!("running generator {} for entry {}", generator.name(), entry.label());
        let entry_ctx = ctx.for_run_config(entry.config.clone());
        let produced = generator.run(&entry_ctx).map_err(|e| Error::GeneratorRunFailed {
            name: entry.label().to_string(),
            source: Box::new(e),
        })?;
        results.push((entry.label().to_string(), produced));
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;
    use crate::registry::{priority, Generator, Registry};

    struct OneFile;

    impl Generator for OneFile {
        fn name(&self) -> &str {
            "onefile"
        }

        fn priority(&self) -> i32 {
            priority::NORMAL
        }

        fn run(&self, _ctx: &RunContext) -> Result<FileSystemMap<StateWithChangeReason>> {
            let mut map = FileSystemMap::new();
            map.add(
                Path::new("a.txt").unwrap(),
                StateWithChangeReason::new(crate::state::FileState::present(b"hi".to_vec(), 0o644), "onefile"),
            )?;
            Ok(map)
        }
    }

    #[test]
    fn test_run_collects_all_generator_outputs() {
        let registry = Registry::new(vec![Box::new(OneFile)]).unwrap();
        let ctx = RunContext::new(
            crate::config::RootConfig {
                version: 1,
                logic: vec![],
                children: vec![],
                syncs: vec![crate::config::SyncEntry {
                    name: None,
                    logic: "onefile".to_string(),
                    config: serde_yaml::Value::Null,
                }],
            },
            std::sync::Arc::new(registry),
            ".",
        );

        let results = execute(&ctx).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, "onefile");
        assert_eq!(results[0].1.len(), 1);
    }

    #[test]
    fn test_run_invokes_shared_generator_kind_per_entry() {
        let registry = Registry::new(vec![Box::new(OneFile)]).unwrap();
        let ctx = RunContext::new(
            crate::config::RootConfig {
                version: 1,
                logic: vec![],
                children: vec![],
                syncs: vec![
                    crate::config::SyncEntry {
                        name: Some("first".to_string()),
                        logic: "onefile".to_string(),
                        config: serde_yaml::Value::Null,
                    },
                    crate::config::SyncEntry {
                        name: Some("second".to_string()),
                        logic: "onefile".to_string(),
                        config: serde_yaml::Value::Null,
                    },
                ],
            },
            std::sync::Arc::new(registry),
            ".",
        );

        let results = execute(&ctx).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "first");
        assert_eq!(results[1].0, "second");
    }

    #[test]
    fn test_run_unknown_logic_entry_is_error() {
        let registry = Registry::new(vec![Box::new(OneFile)]).unwrap();
        let ctx = RunContext::new(
            crate::config::RootConfig {
                version: 1,
                logic: vec![],
                children: vec![],
                syncs: vec![crate::config::SyncEntry {
                    name: None,
                    logic: "missing".to_string(),
                    config: serde_yaml::Value::Null,
                }],
            },
            std::sync::Arc::new(registry),
            ".",
        );

        let err = execute(&ctx).unwrap_err();
        assert!(matches!(err, Error::UnknownGenerator { .. }));
    }
}
