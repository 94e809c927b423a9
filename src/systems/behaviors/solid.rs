use crate::core::error::StepFault;
use crate::domain::element::ElementBehavior;
use crate::systems::primitives::StepContext;

use super::common::settle;

/// Never moves; reacts, burns, conducts heat and changes phase.
pub struct StaticBehavior;

impl ElementBehavior for StaticBehavior {
    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), StepFault> {
        settle(ctx)?;
        Ok(())
    }
}
