//! Heat diffusion and phase change.
//!
//! Exchange is pairwise and symmetric: whatever one particle gains its
//! neighbour loses, so the total heat of a closed region is conserved and
//! its temperature variance never grows.

use crate::core::error::StepFault;

use super::transform::{transform_self, Heat};
use super::{StepContext, NEIGHBORS_8};

/// Exchange heat with the (up to 8) occupied neighbours. The pairwise rate
/// is the geometric mean of both conductivities times
/// `heat_exchange_scale`, so an insulator (conductivity 0) never exchanges.
pub fn diffuse_heat(ctx: &mut StepContext<'_>) -> Result<(), StepFault> {
    let own = ctx.defaults()?.conductivity;
    if own <= 0.0 {
        return Ok(());
    }
    let scale = ctx.settings.heat_exchange_scale;
    let (x, y) = ctx.pos();

    for (dx, dy) in NEIGHBORS_8 {
        let (nx, ny) = (x + dx, y + dy);
        let Some(other) = ctx.defaults_at(nx, ny) else { continue };
        let rate = (own * other.conductivity).sqrt() * scale;
        if rate <= 0.0 {
            continue;
        }
        let (Some(mine), Some(theirs)) = (
            ctx.grid.get(x, y).map(|p| p.temperature),
            ctx.grid.get(nx, ny).map(|p| p.temperature),
        ) else {
            continue;
        };
        let delta = (theirs - mine) * rate;
        if let Some(p) = ctx.grid.get_mut(x, y) {
            p.temperature += delta;
        }
        if let Some(p) = ctx.grid.get_mut(nx, ny) {
            p.temperature -= delta;
        }
    }
    Ok(())
}

/// Relax toward `ambient_temperature` at the element's `ambient_exchange`
/// rate. This is the only heat source/sink outside of explicit effects.
pub fn exchange_ambient(ctx: &mut StepContext<'_>) -> Result<(), StepFault> {
    let rate = ctx.defaults()?.ambient_exchange;
    if rate <= 0.0 {
        return Ok(());
    }
    let ambient = ctx.settings.ambient_temperature;
    let p = ctx.particle_mut()?;
    p.temperature += (ambient - p.temperature) * rate;
    Ok(())
}

/// Replace the particle when its temperature crossed a threshold. The new
/// particle keeps the temperature. Returns true when a change happened.
pub fn apply_phase_change(ctx: &mut StepContext<'_>) -> Result<bool, StepFault> {
    let defaults = ctx.defaults()?;
    let temperature = ctx.particle()?.temperature;
    match defaults.phase_change.check(temperature) {
        Some(to) => {
            transform_self(ctx, to, Heat::Keep)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// `diffuse_heat`, `exchange_ambient`, then `apply_phase_change`.
pub fn thermal_step(ctx: &mut StepContext<'_>) -> Result<bool, StepFault> {
    diffuse_heat(ctx)?;
    exchange_ambient(ctx)?;
    apply_phase_change(ctx)
}
