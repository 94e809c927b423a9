//! Acid: a liquid that dissolves its neighbours and weakens as it does.

use crate::core::error::StepFault;
use crate::core::rng::SimRng;
use crate::domain::element::{ElementBehavior, ElementDefaults};
use crate::domain::particle::Particle;
use crate::systems::primitives::{
    corrode, flow, spawn, thermal_step, transform_self, Heat, StepContext, NEIGHBORS_4,
};

pub const POTENCY: &str = "potency";
pub const POTENCY_DECAY: &str = "potencyDecay";

const DILUTED: f64 = 0.1;
const DEFAULT_DECAY: f64 = 0.15;
const FUME_CHANCE: f32 = 0.3;

/// What diluted acid turns into, and the gas it gives off.
const DILUTED_INTO: &str = "water";
const FUMES: &str = "acid-gas";

pub struct AcidBehavior;

impl ElementBehavior for AcidBehavior {
    fn on_create(&self, p: &mut Particle, _defaults: &ElementDefaults, _rng: &mut SimRng) {
        if !p.extras.contains(POTENCY) {
            p.extras.set_float(POTENCY, 1.0);
        }
    }

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), StepFault> {
        if thermal_step(ctx)? {
            return Ok(());
        }

        let (x, y) = ctx.pos();
        let potency = ctx.particle()?.extras.float(POTENCY).unwrap_or(1.0);
        for (dx, dy) in NEIGHBORS_4 {
            let (nx, ny) = (x + dx, y + dy);
            match ctx.grid.get(nx, ny) {
                Some(n) if !n.corrosive => {}
                _ => continue,
            }
            if !corrode(ctx, nx, ny, potency as f32)? {
                continue;
            }
            if ctx.registry.contains(FUMES) && ctx.rng.chance(FUME_CHANCE) {
                spawn(ctx, nx, ny, FUMES)?;
            }
            let p = ctx.particle_mut()?;
            let decay = p.extras.float(POTENCY_DECAY).unwrap_or(DEFAULT_DECAY);
            let left = potency - decay;
            p.extras.set_float(POTENCY, left);
            if left <= DILUTED && ctx.registry.contains(DILUTED_INTO) {
                transform_self(ctx, DILUTED_INTO, Heat::Keep)?;
                return Ok(());
            }
            // One bite per tick
            break;
        }

        let defaults = ctx.defaults()?;
        let reach = defaults.reach.unwrap_or(ctx.settings.liquid_reach);
        flow(ctx, reach, defaults.flow_chance);
        Ok(())
    }
}
