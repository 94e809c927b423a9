//! Charge conduction.
//!
//! Charge is an integer level in the `charge` extra. A source pins its own
//! level; every `conductive` particle takes one less than its strongest
//! 4-neighbour, so charge fades with distance along a wire and drains away
//! once the source is gone. A conductor carrying charge heats up.

use crate::core::error::StepFault;
use crate::domain::particle::Particle;

use super::{StepContext, NEIGHBORS_4};

pub const CHARGE: &str = "charge";

/// Temperature gained per tick while carrying charge.
pub const JOULE_HEAT: f32 = 0.1;

#[inline]
pub fn charge_of(p: &Particle) -> i64 {
    p.extras.int(CHARGE).unwrap_or(0).max(0)
}

/// Pull charge from the neighbourhood into the stepped particle. Particles
/// that are not conductive are left untouched. Returns whether the particle
/// carries charge afterwards.
pub fn conduct(ctx: &mut StepContext<'_>) -> Result<bool, StepFault> {
    if !ctx.particle()?.conductive {
        return Ok(false);
    }
    let (x, y) = ctx.pos();
    let strongest = NEIGHBORS_4
        .iter()
        .filter_map(|(dx, dy)| ctx.grid.get(x + dx, y + dy))
        .map(charge_of)
        .max()
        .unwrap_or(0);
    let level = (strongest - 1).max(0);

    let p = ctx.particle_mut()?;
    if level > 0 {
        p.extras.set_int(CHARGE, level);
        p.temperature += JOULE_HEAT;
    } else {
        p.extras.remove(CHARGE);
    }
    Ok(level > 0)
}

/// Make the stepped particle a source holding `level`.
pub fn energize(ctx: &mut StepContext<'_>, level: i64) -> Result<(), StepFault> {
    ctx.particle_mut()?.extras.set_int(CHARGE, level.max(0));
    Ok(())
}
