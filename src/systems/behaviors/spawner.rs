use crate::core::error::StepFault;
use crate::domain::element::ElementBehavior;
use crate::systems::primitives::{spawn, with_probability, StepContext};

/// Emits its `spawns` element into the neighbouring cell in the configured
/// direction (faucets, torches).
pub struct SpawnerBehavior;

impl ElementBehavior for SpawnerBehavior {
    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), StepFault> {
        let defaults = ctx.defaults()?;
        let Some(rule) = &defaults.spawns else { return Ok(()) };
        let (dx, dy) = rule.direction.offset();
        let (x, y) = ctx.pos();
        with_probability(ctx, rule.chance, |ctx| {
            spawn(ctx, x + dx, y + dy, &rule.element)?;
            Ok(())
        })?;
        Ok(())
    }
}
