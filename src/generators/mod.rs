//! Built-in generators.
//!
//! `static_file` and `section_merger` are grounded directly on
//! `original_source/sharedapi/drift/staticfile/staticfile.go` and
//! `existingfileparser/parser.go`; `template_renderer` fills the
//! `spec.md` §4.9 role using `handlebars`, enriched from the retrieval
//! pack since the teacher carries no templating crate.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::io::StateLoader;
use crate::registry::{Generator, Registry};

pub mod helpers;
pub mod section_merger;
pub mod static_file;
pub mod template_renderer;

pub use section_merger::SectionMergeGenerator;
pub use static_file::StaticFileGenerator;
pub use template_renderer::TemplateRenderer;

/// The generator kind names this crate ships, in the order `info`/error
/// suggestions should list them.
pub const BUILTIN_NAMES: &[&str] = &[
    StaticFileGenerator::name(),
    TemplateRenderer::name(),
    SectionMergeGenerator::name(),
];

/// Constructs a stateless generator instance for `logic`. No per-invocation
/// config is baked in here -- each sync entry's config subtree is threaded
/// through `RunContext::run_config` at Run time instead (`phases::run`), so
/// the instance this returns can serve as many sync entries naming this
/// kind as the root config declares.
///
/// Grounded on `original_source/sharedapi/syncer/registry.go`, whose
/// `Registry` keys generators by their stable `Name()` identity, and
/// `syncrun.go`'s `SyncRun`, which carries the per-invocation `RunConfig`
/// separately from the registry rather than baking it into the generator.
pub fn build(logic: &str, loader: Arc<dyn StateLoader>) -> Result<Box<dyn Generator>> {
    match logic {
        n if n == StaticFileGenerator::name() => Ok(Box::new(StaticFileGenerator::new())),
        n if n == TemplateRenderer::name() => Ok(Box::new(TemplateRenderer::new())),
        n if n == SectionMergeGenerator::name() => Ok(Box::new(SectionMergeGenerator::new(loader))),
        other => Err(Error::UnknownGenerator {
            name: other.to_string(),
        }),
    }
}

/// Builds a `Registry` holding one instance per distinct generator kind
/// referenced in `syncs`, rooted at `destination_root` for generators (like
/// `section_merge`) that need to read existing file state during `Run`.
///
/// Sync entries that share a `logic` kind (e.g. two `staticfile` entries)
/// invoke the same registered instance, each with its own config threaded
/// through at Run time -- they never collide as duplicate registrations.
pub fn build_registry(
    syncs: &[crate::config::SyncEntry],
    loader: Arc<dyn StateLoader>,
) -> Result<Registry> {
    let mut seen = std::collections::HashSet::new();
    let mut generators = Vec::new();
    for entry in syncs {
        if seen.insert(entry.logic.clone()) {
            generators.push(build(&entry.logic, loader.clone())?);
        }
    }
    Registry::new(generators)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::PosixStateLoader;

    fn config(yaml: &str) -> serde_yaml::Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_build_dispatches_staticfile() {
        let loader: Arc<dyn StateLoader> = Arc::new(PosixStateLoader::new("."));
        let generator = build("staticfile", loader).unwrap();
        assert_eq!(generator.name(), "staticfile");
    }

    #[test]
    fn test_build_unknown_logic_is_error() {
        let loader: Arc<dyn StateLoader> = Arc::new(PosixStateLoader::new("."));
        let err = build("nonsense", loader).unwrap_err();
        assert!(matches!(err, Error::UnknownGenerator { name } if name == "nonsense"));
    }

    #[test]
    fn test_build_registry_shares_one_instance_across_duplicate_logic_entries() {
        let loader: Arc<dyn StateLoader> = Arc::new(PosixStateLoader::new("."));
        let syncs = vec![
            crate::config::SyncEntry {
                name: Some("readme".to_string()),
                logic: "staticfile".to_string(),
                config: config("filename: README.md\ncontent: hi\n"),
            },
            crate::config::SyncEntry {
                name: Some("license".to_string()),
                logic: "staticfile".to_string(),
                config: config("filename: LICENSE\ncontent: bye\n"),
            },
        ];
        let registry = build_registry(&syncs, loader).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("staticfile").is_some());
    }

    #[test]
    fn test_build_registry_rejects_unknown_logic() {
        let loader: Arc<dyn StateLoader> = Arc::new(PosixStateLoader::new("."));
        let syncs = vec![crate::config::SyncEntry {
            name: None,
            logic: "nonsense".to_string(),
            config: config("{}"),
        }];
        let err = build_registry(&syncs, loader).unwrap_err();
        assert!(matches!(err, Error::UnknownGenerator { .. }));
    }
}
