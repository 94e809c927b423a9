use crate::core::error::StepFault;
use crate::core::rng::SimRng;
use crate::domain::element::{ElementBehavior, ElementDefaults};
use crate::domain::particle::Particle;
use crate::systems::primitives::chance::{ignite, ignition_for, with_probability, BURNING};
use crate::systems::primitives::gas::drift;
use crate::systems::primitives::{diffuse_heat, react, rise, StepContext, NEIGHBORS_8};

use super::common::{age, init_lifetime};

const RISE_CHANCE: f32 = 0.6;

/// Short-lived flame: heats and ignites what it touches, flickers upward,
/// then turns into smoke (or nothing).
pub struct FireBehavior;

impl ElementBehavior for FireBehavior {
    fn on_create(&self, p: &mut Particle, defaults: &ElementDefaults, rng: &mut SimRng) {
        p.extras.set_flag(BURNING, true);
        init_lifetime(p, defaults, rng);
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), StepFault> {
        if react(ctx)? || age(ctx)? {
            return Ok(());
        }

        let (x, y) = ctx.pos();
        for (dx, dy) in NEIGHBORS_8 {
            let (nx, ny) = (x + dx, y + dy);
            let Some(defaults) = ctx.defaults_at(nx, ny) else { continue };
            let Some(ignition) = ctx.grid.get(nx, ny).and_then(|p| ignition_for(p, defaults)) else {
                continue;
            };
            with_probability(ctx, ignition.chance, |ctx| {
                ignite(ctx, nx, ny);
                Ok(())
            })?;
        }
        diffuse_heat(ctx)?;

        if ctx.rng.chance(RISE_CHANCE) {
            rise(ctx);
        } else {
            drift(ctx);
        }
        Ok(())
    }
}
