//! Combustion of flammable particles.
//!
//! A lit particle carries `burning = true` and a `burnLeft` countdown in its
//! extension bag. Each tick it stays at least at its ignition point, may
//! throw a flame into the cell above, and when the countdown ends becomes
//! its `burnsInto` element (ash, ...) or disappears.

use crate::core::error::StepFault;
use crate::core::rng::SimRng;
use crate::domain::element::{ElementBehavior, ElementDefaults, EMPTY};
use crate::domain::particle::Particle;
use crate::systems::primitives::chance::{
    ignition_for, is_burning, light, with_probability, BURN_LEFT,
};
use crate::systems::primitives::explosion::BLAST_FIRE;
use crate::systems::primitives::{spawn, transform_self, Heat, StepContext};

use super::common::settle;

const FLAME_CHANCE: f32 = 0.3;

/// Advance the burn of the stepped particle. Returns true when it burnt out.
pub(crate) fn burn(ctx: &mut StepContext<'_>) -> Result<bool, StepFault> {
    if !is_burning(ctx.particle()?) {
        return Ok(false);
    }
    let defaults = ctx.defaults()?;
    let p = ctx.particle_mut()?;
    let ignition = ignition_for(p, defaults);
    let left = p.extras.int(BURN_LEFT).unwrap_or(0) - 1;
    if left <= 0 {
        let into = ignition.and_then(|i| i.burns_into.as_deref()).unwrap_or(EMPTY);
        transform_self(ctx, into, Heat::Keep)?;
        return Ok(true);
    }
    p.extras.set_int(BURN_LEFT, left);
    if let Some(ignition) = ignition {
        p.temperature = p.temperature.max(ignition.point);
    }

    if ctx.registry.contains(BLAST_FIRE) {
        with_probability(ctx, FLAME_CHANCE, |ctx| {
            let (x, y) = ctx.pos();
            spawn(ctx, x, y - 1, BLAST_FIRE)?;
            Ok(())
        })?;
    }
    Ok(false)
}

/// Static fuel that is already alight when created (embers, coal).
pub struct BurningBehavior;

impl ElementBehavior for BurningBehavior {
    fn on_create(&self, p: &mut Particle, defaults: &ElementDefaults, _rng: &mut SimRng) {
        light(p, defaults);
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), StepFault> {
        settle(ctx)?;
        Ok(())
    }
}
