//! # Generator Registry
//!
//! `Generator` is the unit of work in the drift pipeline: given a
//! `RunContext`, it produces a `FileSystemMap<StateWithChangeReason>` of the
//! paths it wants to exist. `Registry` holds the fixed set of generators for
//! a run, sorted by `(priority, name)` so that ordering is deterministic
//! regardless of registration order.
//!
//! Grounded on `original_source/sharedapi/syncer/driftsyncer.go`
//! (`Generator` interface, `Priority` constants) and `registry.go`
//! (`Registry.Registered()`'s sort). Go's generators satisfy `Setup` and
//! `Mutatable[T]` implicitly, by simply having the right methods; Rust has
//! no such structural typing for trait objects, so both capabilities are
//! exposed as optional downcasts from the base `Generator` trait object
//! (`as_setup`, `as_mutatable`), looked up by `TypeId` for `Mutatable` — this
//! is the one place this crate diverges from a literal port of the Go
//! interface shape.

use std::any::{Any, TypeId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::context::RunContext;
use crate::error::{Error, Result};
use crate::filesystem::FileSystemMap;
use crate::mutator::MutatorList;
use crate::state::StateWithChangeReason;

/// Named priority bands for generator ordering, widest first.
pub mod priority {
    pub const LOWEST: i32 = 100;
    pub const LOW: i32 = 200;
    pub const NORMAL: i32 = 300;
    pub const HIGH: i32 = 400;
    pub const HIGHEST: i32 = 500;
}

/// A unit of work that produces desired file state.
pub trait Generator {
    /// Unique name, as referenced from sync entries in the root config.
    fn name(&self) -> &str;

    /// Sort key within the Setup and Run passes. Lower runs first.
    fn priority(&self) -> i32 {
        priority::NORMAL
    }

    /// Produces this generator's contribution to the desired file tree.
    fn run(&self, ctx: &RunContext) -> Result<FileSystemMap<StateWithChangeReason>>;

    /// Decodes and validates a sync entry's config subtree against this
    /// generator's schema, without touching disk. Used by the `validate`
    /// command to catch malformed entries ahead of Plan/Apply. Default: no
    /// config, nothing to validate.
    fn validate_config(&self, _run_config: &serde_yaml::Value) -> Result<()> {
        Ok(())
    }

    /// Returns `self` as a `Setup` trait object, if this generator has a
    /// setup phase. Default: none.
    fn as_setup(&self) -> Option<&dyn Setup> {
        None
    }

    /// Returns a `RefCell<MutatorList<T>>` for the requested `type_id`, if
    /// this generator accepts mutators of that config type. Default: none.
    fn as_mutatable(&self, _type_id: TypeId) -> Option<&dyn Any> {
        None
    }
}

/// A generator's side-effect phase, run before any `Generator::run`. Setup
/// is the only place a generator may register mutators on other generators
/// (via `Registry::add_mutator`).
pub trait Setup: Generator {
    fn setup(&self, registry: &Registry) -> Result<()>;
}

/// Marker for a generator whose config type `T` accepts `MutatorList<T>`
/// entries from other generators' `Setup` steps.
pub trait Mutatable<T: 'static> {
    fn mutator_list(&self) -> &RefCell<MutatorList<T>>;
}

/// The fixed set of generators participating in a run, sorted by
/// `(priority, name)`.
pub struct Registry {
    generators: Vec<Box<dyn Generator>>,
    index: HashMap<String, usize>,
    locked: Cell<bool>,
}

impl Registry {
    /// Builds a registry from an unordered list of generators. Fails if two
    /// generators share a name.
    pub fn new(mut generators: Vec<Box<dyn Generator>>) -> Result<Self> {
        generators.sort_by(|a, b| {
            a.priority()
                .cmp(&b.priority())
                .then_with(|| a.name().cmp(b.name()))
        });

        let mut index = HashMap::new();
        for (i, generator) in generators.iter().enumerate() {
            if index.insert(generator.name().to_string(), i).is_some() {
                return Err(Error::GeneratorAlreadyRegistered {
                    name: generator.name().to_string(),
                });
            }
        }

        Ok(Registry {
            generators,
            index,
            locked: Cell::new(false),
        })
    }

    /// Generators in `(priority, name)` order — the order Setup and Run
    /// passes iterate.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Generator> {
        self.generators.iter().map(|g| g.as_ref())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Generator> {
        self.index.get(name).map(|&i| self.generators[i].as_ref())
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Forbids further `add_mutator` calls. Called by the orchestrator once
    /// the Setup pass has completed.
    pub fn lock(&self) {
        self.locked.set(true);
    }

    /// Registers a mutator on the generator named `name`, for config type
    /// `T`. Only valid during Setup (before `lock` is called).
    pub fn add_mutator<T: 'static>(
        &self,
        name: &str,
        mutator: Box<dyn Fn(&mut T) -> Result<()>>,
    ) -> Result<()> {
        if self.locked.get() {
            return Err(Error::MutatorsLocked {
                name: name.to_string(),
            });
        }
        let generator = self
            .get(name)
            .ok_or_else(|| Error::UnknownGenerator {
                name: name.to_string(),
            })?;
        let any = generator
            .as_mutatable(TypeId::of::<T>())
            .ok_or_else(|| Error::NotMutatable {
                name: name.to_string(),
            })?;
        let cell = any
            .downcast_ref::<RefCell<MutatorList<T>>>()
            .ok_or_else(|| Error::NotMutatable {
                name: name.to_string(),
            })?;
        cell.borrow_mut().push(mutator);
        Ok(())
    }
}
