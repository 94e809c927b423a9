use crate::core::error::StepFault;
use crate::core::rng::SimRng;
use crate::domain::element::{ElementBehavior, ElementDefaults};
use crate::domain::particle::Particle;
use crate::systems::primitives::{react, rise, thermal_step, StepContext};

use super::common::{age, init_lifetime};

/// Rises and drifts; fades away when its lifetime runs out.
pub struct GasBehavior;

impl ElementBehavior for GasBehavior {
    fn on_create(&self, p: &mut Particle, defaults: &ElementDefaults, rng: &mut SimRng) {
        init_lifetime(p, defaults, rng);
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), StepFault> {
        if react(ctx)? || age(ctx)? || thermal_step(ctx)? {
            return Ok(());
        }
        rise(ctx);
        Ok(())
    }
}
