use crate::core::error::ConfigError;
use crate::domain::particle::ParticleOverrides;
use crate::systems::effects::EffectKind;

use super::Simulation;

pub(super) fn add_particle(
    sim: &mut Simulation,
    x: i32,
    y: i32,
    kind: &str,
    overrides: &ParticleOverrides,
) -> Result<bool, ConfigError> {
    if !sim.grid.is_empty(x, y) {
        return Ok(false);
    }
    let particle = sim.registry.instantiate(kind, overrides, &mut sim.rng)?;
    Ok(sim.grid.place(x, y, particle).is_ok())
}

pub(super) fn add_particles_in_radius(
    sim: &mut Simulation,
    cx: i32,
    cy: i32,
    radius: i32,
    kind: &str,
) -> Result<u32, ConfigError> {
    // Fail before touching the grid
    sim.registry.lookup(kind)?;
    let none = ParticleOverrides::none();
    let mut placed = 0;
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 && add_particle(sim, cx + dx, cy + dy, kind, &none)? {
                placed += 1;
            }
        }
    }
    Ok(placed)
}

pub(super) fn remove_particle(sim: &mut Simulation, x: i32, y: i32) -> bool {
    sim.grid.take(x, y).is_some()
}

pub(super) fn remove_particles_in_radius(sim: &mut Simulation, cx: i32, cy: i32, radius: i32) -> u32 {
    let mut removed = 0;
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 && remove_particle(sim, cx + dx, cy + dy) {
                removed += 1;
            }
        }
    }
    removed
}

pub(super) fn clear(sim: &mut Simulation) {
    sim.grid.clear();
    sim.effects.clear();
}

/// Delays count from the next tick: `delay == 0` fires at its flush.
pub(super) fn schedule_effect(sim: &mut Simulation, kind: EffectKind, origin: (i32, i32), delay: u32) -> u64 {
    sim.effects.set_frame(sim.frame);
    sim.effects.schedule(kind, origin, delay)
}
