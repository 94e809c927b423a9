use crate::core::error::StepFault;
use crate::domain::element::ElementBehavior;
use crate::systems::primitives::{flow, StepContext};

use super::common::settle;

/// Falls, slides and spreads sideways. Reach comes from the element (or
/// the simulation default); `flowChance` slows viscous liquids.
pub struct LiquidBehavior;

impl ElementBehavior for LiquidBehavior {
    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), StepFault> {
        if settle(ctx)? {
            return Ok(());
        }
        let defaults = ctx.defaults()?;
        let reach = defaults.reach.unwrap_or(ctx.settings.liquid_reach);
        flow(ctx, reach, defaults.flow_chance);
        Ok(())
    }
}
