//! Type replacement: a particle that changes kind is rebuilt from the new
//! element's defaults (fresh extension bag), never edited in place.

use crate::core::error::StepFault;
use crate::domain::element::EMPTY;
use crate::domain::particle::ParticleOverrides;

use super::StepContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heat {
    /// New particle starts at its element's default temperature
    Reset,
    /// New particle inherits the old particle's temperature
    Keep,
}

/// Replace whatever is at `(x, y)` with a fresh `kind` particle (or empty
/// the cell for `"empty"`). Out-of-bounds targets are ignored.
pub fn transform(
    ctx: &mut StepContext<'_>,
    x: i32,
    y: i32,
    kind: &str,
    heat: Heat,
) -> Result<(), StepFault> {
    if !ctx.grid.in_bounds(x, y) {
        return Ok(());
    }
    if kind == EMPTY {
        ctx.grid.set(x, y, None);
        return Ok(());
    }
    let overrides = match (heat, ctx.grid.get(x, y)) {
        (Heat::Keep, Some(old)) => ParticleOverrides::with_temperature(old.temperature),
        _ => ParticleOverrides::none(),
    };
    let particle = ctx.registry.instantiate(kind, &overrides, ctx.rng)?;
    ctx.grid.set(x, y, Some(particle));
    Ok(())
}

/// `transform` applied to the particle being stepped.
pub fn transform_self(ctx: &mut StepContext<'_>, kind: &str, heat: Heat) -> Result<(), StepFault> {
    let (x, y) = ctx.pos();
    transform(ctx, x, y, kind, heat)
}

/// Create `kind` at `(x, y)` only if the cell is empty.
pub fn spawn(ctx: &mut StepContext<'_>, x: i32, y: i32, kind: &str) -> Result<bool, StepFault> {
    if !ctx.grid.is_empty(x, y) {
        return Ok(false);
    }
    let particle = ctx
        .registry
        .instantiate(kind, &ParticleOverrides::none(), ctx.rng)?;
    Ok(ctx.grid.place(x, y, particle).is_ok())
}

/// Spawn into the first empty 4-neighbour, trying up first.
pub fn spawn_adjacent(ctx: &mut StepContext<'_>, kind: &str) -> Result<bool, StepFault> {
    let (x, y) = ctx.pos();
    for (dx, dy) in super::NEIGHBORS_4 {
        if spawn(ctx, x + dx, y + dy, kind)? {
            return Ok(true);
        }
    }
    Ok(false)
}
