//! Explosives light like any flammable particle; once lit they arm a fuse
//! by queueing a delayed explosion at their own position.

use crate::core::error::StepFault;
use crate::domain::element::ElementBehavior;
use crate::domain::particle::Phase;
use crate::systems::primitives::chance::{catch_fire, is_burning};
use crate::systems::primitives::explosion::BLAST_SMOKE;
use crate::systems::primitives::transform::spawn_adjacent;
use crate::systems::primitives::{detonate, fall, react, thermal_step, StepContext};

/// Set once the explosion has been queued.
pub const ARMED: &str = "armed";

const SMOKE_EVERY: u64 = 3;

pub struct ExplosiveBehavior;

impl ElementBehavior for ExplosiveBehavior {
    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), StepFault> {
        if ctx.particle()?.extras.flag(ARMED) {
            // Fuse burning: stay put and smoke
            if ctx.frame % SMOKE_EVERY == 0 && ctx.registry.contains(BLAST_SMOKE) {
                spawn_adjacent(ctx, BLAST_SMOKE)?;
            }
            return Ok(());
        }
        if react(ctx)? {
            return Ok(());
        }
        catch_fire(ctx)?;

        if is_burning(ctx.particle()?) {
            let defaults = ctx.defaults()?;
            let fuse = match defaults.explosive.as_ref().and_then(|e| e.fuse) {
                Some(range) => ctx.rng.range_inclusive(range.min, range.max),
                None => 0,
            };
            detonate(ctx, fuse)?;
            ctx.particle_mut()?.extras.set_flag(ARMED, true);
            return Ok(());
        }

        if thermal_step(ctx)? {
            return Ok(());
        }
        if ctx.particle()?.phase == Phase::Powder {
            fall(ctx);
        }
        Ok(())
    }
}
