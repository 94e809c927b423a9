use super::density::try_enter;
use super::StepContext;

/// Straight down, else one of the two lower diagonals (order picked per
/// call), else stay. Returns whether the particle moved.
pub fn fall(ctx: &mut StepContext<'_>) -> bool {
    let (x, y) = ctx.pos();
    if try_enter(ctx, x, y + 1) {
        return true;
    }
    let (first, second) = ctx.rng.sides();
    try_enter(ctx, x + first, y + 1) || try_enter(ctx, x + second, y + 1)
}
