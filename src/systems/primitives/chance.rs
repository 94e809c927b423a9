//! Probabilistic interactions. Everything random here draws from the one
//! simulation RNG through `with_probability`.

use crate::core::error::StepFault;
use crate::domain::element::{ElementDefaults, Ignition, EMPTY};
use crate::domain::particle::Particle;

use super::transform::{transform, Heat};
use super::{StepContext, NEIGHBORS_4, NEIGHBORS_8};

/// Extension-bag keys shared by the combustion rules.
pub const BURNING: &str = "burning";
pub const BURN_LEFT: &str = "burnLeft";

/// Burn time when the element does not declare one.
pub const DEFAULT_BURN_TICKS: u32 = 40;

/// Used for particles made flammable per instance whose element has no
/// `ignition` rule of its own.
pub static FALLBACK_IGNITION: Ignition = Ignition {
    chance: 0.1,
    point: 300.0,
    burn_duration: None,
    burns_into: None,
};

/// Ignition rule governing `p`, or `None` when the particle is not
/// flammable (the per-instance flag wins over the element's rule).
pub fn ignition_for<'d>(p: &Particle, defaults: &'d ElementDefaults) -> Option<&'d Ignition> {
    if !p.flammable {
        return None;
    }
    Some(defaults.ignition.as_ref().unwrap_or(&FALLBACK_IGNITION))
}

/// Run `effect` with probability `p`. Returns whether it ran.
pub fn with_probability<F>(ctx: &mut StepContext<'_>, p: f32, effect: F) -> Result<bool, StepFault>
where
    F: FnOnce(&mut StepContext<'_>) -> Result<(), StepFault>,
{
    if ctx.rng.chance(p) {
        effect(ctx)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

#[inline]
pub fn is_burning(p: &Particle) -> bool {
    p.extras.flag(BURNING)
}

/// Set a flammable particle alight. No-op for particles that are not
/// flammable or already burn.
pub fn light(p: &mut Particle, defaults: &ElementDefaults) -> bool {
    let Some(ignition) = ignition_for(p, defaults) else { return false };
    if is_burning(p) {
        return false;
    }
    p.extras.set_flag(BURNING, true);
    p.extras.set_int(
        BURN_LEFT,
        ignition.burn_duration.unwrap_or(DEFAULT_BURN_TICKS) as i64,
    );
    p.temperature = p.temperature.max(ignition.point);
    true
}

/// `light` the particle at `(x, y)`.
pub fn ignite(ctx: &mut StepContext<'_>, x: i32, y: i32) -> bool {
    let Some(defaults) = ctx.defaults_at(x, y) else { return false };
    match ctx.grid.get_mut(x, y) {
        Some(p) => light(p, defaults),
        None => false,
    }
}

/// Catch fire from a burning neighbour or from being past the ignition
/// point, with the element's ignition chance. Returns true when lit.
pub fn catch_fire(ctx: &mut StepContext<'_>) -> Result<bool, StepFault> {
    let defaults = ctx.defaults()?;
    let me = ctx.particle()?;
    let Some(ignition) = ignition_for(me, defaults) else { return Ok(false) };
    if is_burning(me) {
        return Ok(false);
    }
    let (x, y) = ctx.pos();
    let hot = me.temperature >= ignition.point;
    let exposed = hot
        || NEIGHBORS_8.iter().any(|(dx, dy)| {
            ctx.grid.get(x + dx, y + dy).map_or(false, is_burning)
        });
    if !exposed {
        return Ok(false);
    }
    with_probability(ctx, ignition.chance, |ctx| {
        let (x, y) = ctx.pos();
        ignite(ctx, x, y);
        Ok(())
    })
}

/// Dissolve the particle at `(x, y)` with probability
/// `strength * (1 - corrosionResistance)`. Returns true when dissolved.
pub fn corrode(ctx: &mut StepContext<'_>, x: i32, y: i32, strength: f32) -> Result<bool, StepFault> {
    let Some(target) = ctx.defaults_at(x, y) else { return Ok(false) };
    let resistance = target.corrosion_resistance;
    if resistance >= 1.0 {
        return Ok(false);
    }
    with_probability(ctx, strength * (1.0 - resistance), |ctx| {
        transform(ctx, x, y, EMPTY, Heat::Reset)
    })
}

/// Apply the first matching reaction with a 4-neighbour. The neighbour is
/// replaced first, then the stepped particle. Returns true when a reaction
/// fired (the stepped particle may be gone).
pub fn react(ctx: &mut StepContext<'_>) -> Result<bool, StepFault> {
    let defaults = ctx.defaults()?;
    if defaults.reactions.is_empty() {
        return Ok(false);
    }
    let (x, y) = ctx.pos();
    for (dx, dy) in NEIGHBORS_4 {
        let (nx, ny) = (x + dx, y + dy);
        let Some(rule) = ctx
            .grid
            .kind_at(nx, ny)
            .and_then(|kind| defaults.reaction_with(kind))
        else {
            continue;
        };
        let fired = with_probability(ctx, rule.chance, |ctx| {
            if let Some(other) = &rule.other_becomes {
                transform(ctx, nx, ny, other, Heat::Reset)?;
            }
            if let Some(me) = &rule.becomes {
                transform(ctx, x, y, me, Heat::Reset)?;
            }
            Ok(())
        })?;
        if fired {
            return Ok(true);
        }
    }
    Ok(false)
}
