//! # TemplateRenderer
//!
//! Renders a bundle of named Handlebars templates to files. The teacher's
//! dependency stack has no templating crate, so this is enriched from the
//! rest of the retrieval pack: several `other_examples/manifests/*/Cargo.toml`
//! files depend on `handlebars`, which this generator is built on.
//!
//! Stateless: one registered instance can serve several sync entries, each
//! with its own `templates`/`vars`, so templates are decoded and registered
//! (`Handlebars::register_template_string`) fresh from `RunContext::run_config`
//! on every `run` rather than once at construction. A malformed template
//! surfaces a parse error from `run`, or from `validate_config`, which the
//! `validate` command uses to catch it ahead of Plan/Apply without writing
//! anything.

use std::any::{Any, TypeId};
use std::cell::RefCell;

use handlebars::Handlebars;
use serde::{Deserialize, Serialize};

use crate::context::RunContext;
use crate::error::{Error, Result};
use crate::filesystem::FileSystemMap;
use crate::generators::helpers;
use crate::mutator::MutatorList;
use crate::path::Path;
use crate::registry::{priority, Generator, Mutatable};
use crate::state::{FileState, StateWithChangeReason};

const DEFAULT_MODE: u32 = 0o644;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSpec {
    pub name: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub mode: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRendererConfig {
    pub templates: Vec<TemplateSpec>,
    #[serde(default)]
    pub vars: serde_yaml::Value,
}

pub struct TemplateRenderer {
    register_helpers: Box<dyn Fn(&mut Handlebars)>,
    mutators: RefCell<MutatorList<TemplateRendererConfig>>,
}

impl TemplateRenderer {
    pub const fn name() -> &'static str {
        "template"
    }

    pub fn new() -> Self {
        TemplateRenderer {
            register_helpers: Box::new(helpers::register_defaults),
            mutators: RefCell::new(MutatorList::new()),
        }
    }

    /// Replaces the default helper set with a caller-supplied one.
    pub fn with_helpers(register: impl Fn(&mut Handlebars) + 'static) -> Self {
        TemplateRenderer {
            register_helpers: Box::new(register),
            mutators: RefCell::new(MutatorList::new()),
        }
    }

    /// Decodes a sync entry's config subtree and registers its templates
    /// into a fresh `Handlebars` instance.
    fn decode(&self, run_config: &serde_yaml::Value) -> Result<(Handlebars<'static>, TemplateRendererConfig)> {
        let config: TemplateRendererConfig =
            serde_yaml::from_value(run_config.clone()).map_err(|e| Error::DecodeFailed {
                name: Self::name().to_string(),
                message: e.to_string(),
            })?;

        let mut handlebars = Handlebars::new();
        (self.register_helpers)(&mut handlebars);
        for spec in &config.templates {
            handlebars
                .register_template_string(&spec.name, &spec.source)
                .map_err(|e| Error::TemplateParse(Box::new(e)))?;
        }

        Ok((handlebars, config))
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for TemplateRenderer {
    fn name(&self) -> &str {
        Self::name()
    }

    fn priority(&self) -> i32 {
        priority::NORMAL
    }

    fn validate_config(&self, run_config: &serde_yaml::Value) -> Result<()> {
        self.decode(run_config).map(|_| ())
    }

    fn run(&self, ctx: &RunContext) -> Result<FileSystemMap<StateWithChangeReason>> {
        let (handlebars, mut config) = self.decode(&ctx.run_config)?;
        self.mutators.borrow().apply(&mut config)?;

        let render_context = serde_json::json!({
            "vars": config.vars,
            "destination_root": ctx.destination_root().display().to_string(),
        });

        let mut result = FileSystemMap::new();
        for spec in &config.templates {
            let rendered = handlebars
                .render(&spec.name, &render_context)
                .map_err(|e| Error::TemplateRender(Box::new(e)))?;
            let mode = spec.mode.unwrap_or(DEFAULT_MODE);
            let path = Path::new(&spec.target)?;
            result.add(
                path,
                StateWithChangeReason::new(
                    FileState::present(rendered.into_bytes(), mode),
                    format!("{} generator ({})", Self::name(), spec.name),
                ),
            )?;
        }
        Ok(result)
    }

    fn as_mutatable(&self, type_id: TypeId) -> Option<&dyn Any> {
        if type_id == TypeId::of::<TemplateRendererConfig>() {
            Some(&self.mutators as &dyn Any)
        } else {
            None
        }
    }
}

impl Mutatable<TemplateRendererConfig> for TemplateRenderer {
    fn mutator_list(&self) -> &RefCell<MutatorList<TemplateRendererConfig>> {
        &self.mutators
    }
}
