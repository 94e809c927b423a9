//! Battery: a charge source. Holds its `power` level in `charge` every tick
//! and may blow up once it overheats.

use crate::core::error::StepFault;
use crate::core::rng::SimRng;
use crate::domain::element::{ElementBehavior, ElementDefaults};
use crate::domain::particle::Particle;
use crate::systems::primitives::electric::CHARGE;
use crate::systems::primitives::{detonate, energize, with_probability, StepContext};

use super::common::settle;
use super::explosive::ARMED;

pub const POWER: &str = "power";

const DEFAULT_POWER: i64 = 10;
const OVERHEAT: f32 = 150.0;
const BLOW_CHANCE: f32 = 0.05;

pub struct BatteryBehavior;

impl ElementBehavior for BatteryBehavior {
    fn on_create(&self, p: &mut Particle, _defaults: &ElementDefaults, _rng: &mut SimRng) {
        if !p.extras.contains(POWER) {
            p.extras.set_int(POWER, DEFAULT_POWER);
        }
        let power = p.extras.int(POWER).unwrap_or(DEFAULT_POWER);
        p.extras.set_int(CHARGE, power);
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), StepFault> {
        if settle(ctx)? {
            return Ok(());
        }
        let p = ctx.particle()?;
        let power = p.extras.int(POWER).unwrap_or(DEFAULT_POWER);
        let overheated = p.temperature > OVERHEAT && !p.extras.flag(ARMED);
        energize(ctx, power)?;

        if overheated && ctx.defaults()?.explosive.is_some() {
            with_probability(ctx, BLOW_CHANCE, |ctx| {
                detonate(ctx, 0)?;
                ctx.particle_mut()?.extras.set_flag(ARMED, true);
                Ok(())
            })?;
        }
        Ok(())
    }
}
