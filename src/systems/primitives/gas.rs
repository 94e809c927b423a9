use super::density::try_enter;
use super::StepContext;

/// Mirror of `fall`: up, then the upper diagonals, then with
/// `gas_drift_chance` a sideways drift.
pub fn rise(ctx: &mut StepContext<'_>) -> bool {
    let (x, y) = ctx.pos();
    if try_enter(ctx, x, y - 1) {
        return true;
    }
    let (first, second) = ctx.rng.sides();
    if ctx.is_empty(x + first, y - 1) && ctx.move_to(x + first, y - 1) {
        return true;
    }
    if ctx.is_empty(x + second, y - 1) && ctx.move_to(x + second, y - 1) {
        return true;
    }
    drift(ctx)
}

/// Random horizontal step into an empty cell.
pub fn drift(ctx: &mut StepContext<'_>) -> bool {
    if !ctx.rng.chance(ctx.settings.gas_drift_chance) {
        return false;
    }
    let (x, y) = ctx.pos();
    let (first, second) = ctx.rng.sides();
    (ctx.is_empty(x + first, y) && ctx.move_to(x + first, y))
        || (ctx.is_empty(x + second, y) && ctx.move_to(x + second, y))
}
