use crate::domain::particle::Phase;

use super::StepContext;

/// Exchange the stepped particle with a lighter (moving down) or heavier
/// (moving up) non-solid neighbour when the densities differ by more than
/// `density_swap_threshold`. Powders do not sink through other powders.
pub fn try_density_swap(ctx: &mut StepContext<'_>, tx: i32, ty: i32) -> bool {
    let (x, y) = ctx.pos();
    let dy = ty - y;
    if dy == 0 {
        return false;
    }
    let (Some(me), Some(other)) = (ctx.grid.get(x, y), ctx.grid.get(tx, ty)) else {
        return false;
    };
    if me.is_static || other.is_static || me.is_solid() || other.is_solid() {
        return false;
    }
    if me.phase == Phase::Powder && other.phase == Phase::Powder {
        return false;
    }
    let threshold = ctx.settings.density_swap_threshold;
    let sinks = if dy > 0 {
        me.density - other.density > threshold
    } else {
        other.density - me.density > threshold
    };
    sinks && ctx.swap_with(tx, ty)
}

/// Enter `(tx, ty)` if it is empty, otherwise try a density swap.
pub fn try_enter(ctx: &mut StepContext<'_>, tx: i32, ty: i32) -> bool {
    if ctx.is_empty(tx, ty) {
        return ctx.move_to(tx, ty);
    }
    try_density_swap(ctx, tx, ty)
}
