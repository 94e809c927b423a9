//! Plants drink from neighbouring water and, once grown enough, sprout a
//! new plant cell into empty space (upward first).

use crate::core::error::StepFault;
use crate::domain::element::{ElementBehavior, EMPTY};
use crate::systems::primitives::chance::is_burning;
use crate::systems::primitives::{
    spawn, transform, with_probability, Heat, StepContext, NEIGHBORS_8,
};

use super::common::settle;

pub const HYDRATION: &str = "hydration";
pub const GROWTH: &str = "growth";

const WATER: &str = "water";
const MAX_HYDRATION: f64 = 10.0;
const DRINK: f64 = 0.5;
/// Chance a drink uses up the water cell
const SIP_CHANCE: f32 = 0.05;
const GROWTH_RATE: f64 = 0.02;
const THIRST: f64 = 0.01;
/// Growth kept when there was no room to sprout
const STALLED: f64 = 0.5;
/// Share of the parent's hydration handed to a new shoot
const SHOOT_SHARE: f64 = 0.7;

pub struct PlantBehavior;

impl ElementBehavior for PlantBehavior {
    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), StepFault> {
        if settle(ctx)? || is_burning(ctx.particle()?) {
            return Ok(());
        }
        drink(ctx)?;

        let p = ctx.particle_mut()?;
        let hydration = p.extras.float(HYDRATION).unwrap_or(0.0);
        if hydration <= 0.0 {
            return Ok(());
        }
        let mut growth = p.extras.float(GROWTH).unwrap_or(0.0) + GROWTH_RATE * hydration.min(1.0);
        if p.temperature < 0.0 {
            growth *= 0.5;
        }
        p.extras.set_float(HYDRATION, (hydration - THIRST).max(0.0));
        if growth < 1.0 {
            p.extras.set_float(GROWTH, growth);
            return Ok(());
        }

        let kind = p.kind.clone();
        let grew = sprout(ctx, &kind, hydration * SHOOT_SHARE)?;
        ctx.particle_mut()?
            .extras
            .set_float(GROWTH, if grew { 0.0 } else { STALLED });
        Ok(())
    }
}

fn drink(ctx: &mut StepContext<'_>) -> Result<(), StepFault> {
    let (x, y) = ctx.pos();
    for (dx, dy) in NEIGHBORS_8 {
        let (nx, ny) = (x + dx, y + dy);
        if ctx.grid.kind_at(nx, ny) != Some(WATER) {
            continue;
        }
        let p = ctx.particle_mut()?;
        let hydration = p.extras.float(HYDRATION).unwrap_or(0.0);
        if hydration >= MAX_HYDRATION {
            break;
        }
        p.extras.set_float(HYDRATION, hydration + DRINK);
        with_probability(ctx, SIP_CHANCE, |ctx| transform(ctx, nx, ny, EMPTY, Heat::Reset))?;
    }
    Ok(())
}

/// Place a new shoot carrying `hydration`. Returns false when boxed in.
fn sprout(ctx: &mut StepContext<'_>, kind: &str, hydration: f64) -> Result<bool, StepFault> {
    let (x, y) = ctx.pos();
    let (first, second) = ctx.rng.sides();
    for (dx, dy) in [(0, -1), (first, 0), (second, 0), (first, -1), (second, -1)] {
        let (nx, ny) = (x + dx, y + dy);
        if spawn(ctx, nx, ny, kind)? {
            if let Some(shoot) = ctx.grid.get_mut(nx, ny) {
                shoot.extras.set_float(HYDRATION, hydration);
            }
            return Ok(true);
        }
    }
    Ok(false)
}
