//! Explosions.
//!
//! `compute_blast` is a pure function of the grid at flush time, the blast
//! parameters and the RNG state; `apply_blast` replays the resulting plan.
//! Behaviors never call either directly: they `detonate`, which only queues
//! an `Explosion` effect.

use std::collections::BTreeSet;

use crate::core::error::{ConfigError, StepFault};
use crate::core::rng::SimRng;
use crate::domain::particle::ParticleOverrides;
use crate::domain::registry::ElementRegistry;
use crate::spatial::Grid;
use crate::systems::effects::apply::{distance, span};
use crate::systems::effects::{EffectKind, EffectQueue};

use super::chance::{ignition_for, light};
use super::StepContext;

/// Element spawned by blasts in the hot zones.
pub const BLAST_FIRE: &str = "fire";
/// Element spawned by blasts around the edges.
pub const BLAST_SMOKE: &str = "smoke";

const CORE_ZONE: f32 = 0.3;
const MIDDLE_ZONE: f32 = 0.7;
const OUTER_HEAT: f32 = 200.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ExplosionSpec {
    pub radius: u32,
    pub power: f32,
    /// Element that must still sit at the origin when the blast fires
    pub expect: Option<String>,
}

/// One cell-level operation of a blast, in the order it will be applied.
#[derive(Clone, Debug, PartialEq)]
pub enum BlastOp {
    Clear { x: i32, y: i32 },
    Place { x: i32, y: i32, kind: String },
    Ignite { x: i32, y: i32 },
    Heat { x: i32, y: i32, amount: f32 },
    /// Another explosive caught in the blast; detonates on a later flush
    Chain { x: i32, y: i32, spec: ExplosionSpec },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlastPlan {
    pub origin: (i32, i32),
    pub ops: Vec<BlastOp>,
}

impl BlastPlan {
    /// Cells whose particle is removed.
    pub fn destroyed(&self) -> BTreeSet<(i32, i32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                BlastOp::Clear { x, y } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    /// Particles created by the blast, in plan order.
    pub fn spawned(&self) -> Vec<(i32, i32, &str)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                BlastOp::Place { x, y, kind } => Some((*x, *y, kind.as_str())),
                _ => None,
            })
            .collect()
    }
}

/// Plan a blast of `spec` centred on `origin`.
///
/// Cells are visited row-major inside the radius. With intensity
/// `i = 1 - d / R`: the core clears everything and leaves fire, the middle
/// ring ignites flammables and otherwise destroys with probability `i`, the
/// outer ring heats by `200 * i * power` and may ignite. Cells whose
/// `blastResistance` is at least `i * power` are untouched, and other
/// explosives chain instead of being destroyed.
pub fn compute_blast(
    grid: &Grid,
    registry: &ElementRegistry,
    origin: (i32, i32),
    spec: &ExplosionSpec,
    rng: &mut SimRng,
) -> BlastPlan {
    let mut plan = BlastPlan { origin, ops: Vec::new() };
    if spec.radius == 0 {
        return plan;
    }
    let rf = spec.radius as f32;
    let (ox, oy) = origin;

    for dy in span(oy, grid.height(), spec.radius) {
        for dx in span(ox, grid.width(), spec.radius) {
            let (x, y) = ((ox as i64 + dx) as i32, (oy as i64 + dy) as i32);
            let d = distance(dx, dy);
            if d > rf {
                continue;
            }
            let i = 1.0 - d / rf;
            let strength = i * spec.power;

            let Some(p) = grid.get(x, y) else {
                // Empty air catches flames and smoke
                if d < CORE_ZONE * rf {
                    if rng.chance(0.7) {
                        plan.ops.push(BlastOp::Place { x, y, kind: BLAST_FIRE.to_string() });
                    }
                } else if d < MIDDLE_ZONE * rf {
                    if rng.chance(0.3 * i) {
                        plan.ops.push(BlastOp::Place { x, y, kind: BLAST_FIRE.to_string() });
                    } else if rng.chance(0.2) {
                        plan.ops.push(BlastOp::Place { x, y, kind: BLAST_SMOKE.to_string() });
                    }
                } else if rng.chance(0.1 * i) {
                    plan.ops.push(BlastOp::Place { x, y, kind: BLAST_SMOKE.to_string() });
                }
                continue;
            };

            if (x, y) == origin {
                plan.ops.push(BlastOp::Clear { x, y });
                plan.ops.push(BlastOp::Place { x, y, kind: BLAST_FIRE.to_string() });
                continue;
            }

            let defaults = registry.defaults(&p.kind);
            let resistance = defaults.map_or(0.0, |d| d.blast_resistance);
            if resistance >= strength {
                continue;
            }
            if let Some(explosive) = defaults.and_then(|d| d.explosive.as_ref()) {
                plan.ops.push(BlastOp::Chain {
                    x,
                    y,
                    spec: ExplosionSpec {
                        radius: explosive.radius,
                        power: explosive.power,
                        expect: Some(p.kind.clone()),
                    },
                });
                continue;
            }
            let flammable = defaults.map_or(false, |d| ignition_for(p, d).is_some());

            if d < CORE_ZONE * rf {
                plan.ops.push(BlastOp::Clear { x, y });
                if rng.chance(0.5) {
                    plan.ops.push(BlastOp::Place { x, y, kind: BLAST_FIRE.to_string() });
                }
            } else if d < MIDDLE_ZONE * rf {
                if flammable {
                    plan.ops.push(BlastOp::Ignite { x, y });
                } else if rng.chance(i) {
                    plan.ops.push(BlastOp::Clear { x, y });
                    if rng.chance(0.3) {
                        plan.ops.push(BlastOp::Place { x, y, kind: BLAST_SMOKE.to_string() });
                    }
                }
            } else {
                plan.ops.push(BlastOp::Heat { x, y, amount: OUTER_HEAT * strength });
                if flammable && rng.chance(0.5 * i) {
                    plan.ops.push(BlastOp::Ignite { x, y });
                }
            }
        }
    }
    plan
}

/// Replay a plan against the grid. Chained explosions are queued one frame
/// out. Returns the number of operations applied.
pub fn apply_blast(
    grid: &mut Grid,
    registry: &ElementRegistry,
    effects: &mut EffectQueue,
    rng: &mut SimRng,
    plan: &BlastPlan,
) -> Result<usize, ConfigError> {
    let mut applied = 0;
    for op in &plan.ops {
        match op {
            BlastOp::Clear { x, y } => grid.set(*x, *y, None),
            BlastOp::Place { x, y, kind } => {
                let particle = registry.instantiate(kind, &ParticleOverrides::none(), rng)?;
                grid.set(*x, *y, Some(particle));
            }
            BlastOp::Ignite { x, y } => {
                let Some(defaults) = grid.get(*x, *y).and_then(|p| registry.defaults(&p.kind)) else {
                    continue;
                };
                if let Some(p) = grid.get_mut(*x, *y) {
                    light(p, defaults);
                }
            }
            BlastOp::Heat { x, y, amount } => {
                if let Some(p) = grid.get_mut(*x, *y) {
                    p.temperature += amount;
                }
            }
            BlastOp::Chain { x, y, spec } => {
                effects.schedule(EffectKind::Explosion(spec.clone()), (*x, *y), 1);
            }
        }
        applied += 1;
    }
    Ok(applied)
}

/// Queue an explosion of the stepped particle's `explosive` spec at its
/// current position, `delay` frames from now.
pub fn detonate(ctx: &mut StepContext<'_>, delay: u32) -> Result<u64, StepFault> {
    let defaults = ctx.defaults()?;
    let Some(explosive) = &defaults.explosive else {
        return Err(StepFault::Rule(format!("`{}` is not explosive", defaults.name)));
    };
    let spec = ExplosionSpec {
        radius: explosive.radius,
        power: explosive.power,
        expect: Some(defaults.name.clone()),
    };
    let origin = ctx.pos();
    Ok(ctx.schedule(EffectKind::Explosion(spec), origin, delay))
}
