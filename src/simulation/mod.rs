//! Simulation - owns the grid, registry, effect queue and RNG, and drives
//! ticks.
//!
//! The registry is passed in at construction; there is no global element
//! table, so several simulations can run side by side.

use std::collections::HashSet;
use std::sync::Arc;

use crate::core::error::ConfigError;
use crate::core::rng::SimRng;
use crate::domain::content::ContentBundle;
use crate::domain::particle::ParticleOverrides;
use crate::domain::registry::ElementRegistry;
use crate::spatial::Grid;
use crate::systems::effects::{EffectKind, EffectQueue};

#[path = "perf/tick_stats.rs"]
mod tick_stats;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
pub mod settings;
mod facade;

pub use facade::Sandbox;
pub use settings::{ScanOrder, SimSettings};
pub use tick_stats::TickStats;

pub struct Simulation {
    grid: Grid,
    registry: Arc<ElementRegistry>,
    effects: EffectQueue,
    rng: SimRng,
    settings: SimSettings,
    frame: u64,
    stats: TickStats,
    /// Unregistered kinds already reported during a scan
    reported_unknown: HashSet<String>,
}

impl Simulation {
    /// Empty grid with the built-in element catalogue and default settings.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        let registry = ContentBundle::builtin()?.into_registry()?;
        Self::with_settings(width, height, SimSettings::default(), Arc::new(registry))
    }

    pub fn with_settings(
        width: u32,
        height: u32,
        settings: SimSettings,
        registry: Arc<ElementRegistry>,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        log::info!(
            "simulation {}x{} seed={:#x} with {} elements",
            width,
            height,
            settings.seed,
            registry.len()
        );
        Ok(Self {
            grid: Grid::new(width, height),
            registry,
            effects: EffectQueue::new(),
            rng: SimRng::seeded(settings.seed),
            settings,
            frame: 0,
            stats: TickStats::default(),
            reported_unknown: HashSet::new(),
        })
    }

    /// Run one full tick.
    pub fn tick(&mut self) {
        step::tick(self);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for placement tools. Only between ticks.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }

    /// Stats of the last completed tick.
    pub fn stats(&self) -> TickStats {
        self.stats
    }

    /// Number of ticks completed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn particle_count(&self) -> usize {
        self.grid.particle_count()
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Place a fresh `kind` particle into an empty cell. `Ok(false)` when
    /// the cell is occupied or out of bounds.
    pub fn add_particle(&mut self, x: i32, y: i32, kind: &str) -> Result<bool, ConfigError> {
        commands::add_particle(self, x, y, kind, &ParticleOverrides::none())
    }

    pub fn add_particle_with(
        &mut self,
        x: i32,
        y: i32,
        kind: &str,
        overrides: &ParticleOverrides,
    ) -> Result<bool, ConfigError> {
        commands::add_particle(self, x, y, kind, overrides)
    }

    /// Fill empty cells within `radius` (brush). Returns the number placed.
    pub fn add_particles_in_radius(
        &mut self,
        cx: i32,
        cy: i32,
        radius: i32,
        kind: &str,
    ) -> Result<u32, ConfigError> {
        commands::add_particles_in_radius(self, cx, cy, radius, kind)
    }

    pub fn remove_particle(&mut self, x: i32, y: i32) -> bool {
        commands::remove_particle(self, x, y)
    }

    pub fn remove_particles_in_radius(&mut self, cx: i32, cy: i32, radius: i32) -> u32 {
        commands::remove_particles_in_radius(self, cx, cy, radius)
    }

    /// Remove all particles and drop pending effects.
    pub fn clear(&mut self) {
        commands::clear(self);
    }

    /// Queue an effect from outside a tick. `delay == 0` applies at the
    /// next tick's flush.
    pub fn schedule_effect(&mut self, kind: EffectKind, origin: (i32, i32), delay: u32) -> u64 {
        commands::schedule_effect(self, kind, origin, delay)
    }

    pub fn pending_effects(&self) -> &EffectQueue {
        &self.effects
    }

    /// Check registry cross-references and that every particle on the grid
    /// has a registered type.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.registry.check_references()?;
        self.registry.validate_grid(&self.grid)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
