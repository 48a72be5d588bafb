//! Phase 1: Setup pass.
//!
//! Iterates generators in registry order and calls `Setup::setup` on each
//! one that implements it. This is the only point where a generator may
//! call `Registry::add_mutator` to influence another generator's decoded
//! config before Run. Once every generator's Setup has completed, the
//! registry is locked against further mutator registration.

use log::debug;

use crate::context::RunContext;
use crate::error::{Error, Result};

pub fn execute(ctx: &RunContext) -> Result<()> {
    for generator in ctx.registry.iter() {
        ctx.cancellation.check()?;
        if let Some(setup) = generator.as_setup() {
            debug!("running setup for generator {}", generator.name());
            setup.setup(&ctx.registry).map_err(|e| Error::GeneratorSetupFailed {
                name: generator.name().to_string(),
                source: Box::new(e),
            })?;
        }
    }
    ctx.registry.lock();
    Ok(())
}
