use crate::core::error::StepFault;
use crate::domain::element::ElementBehavior;
use crate::systems::primitives::{fall, StepContext};

use super::common::settle;

pub struct PowderBehavior;

impl ElementBehavior for PowderBehavior {
    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), StepFault> {
        if settle(ctx)? {
            return Ok(());
        }
        fall(ctx);
        Ok(())
    }
}
