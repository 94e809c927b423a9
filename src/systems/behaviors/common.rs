//! Stages shared by the built-in behaviors.

use crate::core::error::StepFault;
use crate::core::rng::SimRng;
use crate::domain::element::{ElementDefaults, EMPTY};
use crate::domain::particle::Particle;
use crate::systems::primitives::chance::catch_fire;
use crate::systems::primitives::{
    conduct, react, thermal_step, transform_self, Heat, StepContext,
};

use super::burning::burn;

/// Remaining ticks of a particle with a finite lifetime.
pub const LIFE: &str = "life";

/// Roll a lifetime from the element's range unless the particle already
/// carries one.
pub(crate) fn init_lifetime(p: &mut Particle, defaults: &ElementDefaults, rng: &mut SimRng) {
    if let Some(lifetime) = &defaults.lifetime {
        if !p.extras.contains(LIFE) {
            let ticks = rng.range_inclusive(lifetime.min, lifetime.max);
            p.extras.set_int(LIFE, ticks as i64);
        }
    }
}

/// Count the lifetime down; at zero the particle fades into its successor
/// (or nothing). Returns true when it faded.
pub(crate) fn age(ctx: &mut StepContext<'_>) -> Result<bool, StepFault> {
    let defaults = ctx.defaults()?;
    let Some(lifetime) = &defaults.lifetime else { return Ok(false) };
    let p = ctx.particle_mut()?;
    let left = p.extras.int(LIFE).unwrap_or(0) - 1;
    if left > 0 {
        p.extras.set_int(LIFE, left);
        return Ok(false);
    }
    let into = lifetime.fades_into.as_deref().unwrap_or(EMPTY);
    transform_self(ctx, into, Heat::Reset)?;
    Ok(true)
}

/// Everything a particle does to and because of its surroundings before it
/// moves: reactions, combustion, charge, heat and phase change. Returns true
/// when the particle was replaced or removed and the step should end.
pub(crate) fn settle(ctx: &mut StepContext<'_>) -> Result<bool, StepFault> {
    if react(ctx)? {
        return Ok(true);
    }
    if burn(ctx)? {
        return Ok(true);
    }
    catch_fire(ctx)?;
    conduct(ctx)?;
    thermal_step(ctx)
}
