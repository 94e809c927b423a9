use crate::core::error::StepFault;
use crate::core::rng::SimRng;
use crate::domain::element::ElementDefaults;
use crate::domain::particle::Particle;
use crate::domain::registry::ElementRegistry;
use crate::simulation::SimSettings;
use crate::spatial::Grid;
use crate::systems::effects::{EffectKind, EffectQueue};

/// Everything a behavior may touch while its particle is being stepped.
/// `x`/`y` follow the particle when it is moved through the context.
pub struct StepContext<'a> {
    pub grid: &'a mut Grid,
    pub registry: &'a ElementRegistry,
    pub effects: &'a mut EffectQueue,
    pub rng: &'a mut SimRng,
    pub settings: &'a SimSettings,
    pub x: i32,
    pub y: i32,
    pub frame: u64,
}

impl<'a> StepContext<'a> {
    #[inline]
    pub fn pos(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn particle(&self) -> Result<&Particle, StepFault> {
        self.grid
            .get(self.x, self.y)
            .ok_or(StepFault::Vacant { x: self.x, y: self.y })
    }

    pub fn particle_mut(&mut self) -> Result<&mut Particle, StepFault> {
        let (x, y) = (self.x, self.y);
        self.grid.get_mut(x, y).ok_or(StepFault::Vacant { x, y })
    }

    /// Defaults of the particle being stepped.
    pub fn defaults(&self) -> Result<&'a ElementDefaults, StepFault> {
        let registry: &'a ElementRegistry = self.registry;
        let kind = &self.particle()?.kind;
        Ok(&registry.lookup(kind)?.defaults)
    }

    /// Defaults of whatever occupies `(x, y)`; `None` for empty, out of
    /// bounds or unregistered cells.
    pub fn defaults_at(&self, x: i32, y: i32) -> Option<&'a ElementDefaults> {
        let registry: &'a ElementRegistry = self.registry;
        self.grid.get(x, y).and_then(|p| registry.defaults(&p.kind))
    }

    #[inline]
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        self.grid.is_empty(x, y)
    }

    /// Move the stepped particle into an empty cell.
    pub fn move_to(&mut self, x: i32, y: i32) -> bool {
        if self.grid.move_particle(self.x, self.y, x, y) {
            self.x = x;
            self.y = y;
            true
        } else {
            false
        }
    }

    /// Exchange the stepped particle with `(x, y)`. Both particles are
    /// marked processed before the exchange.
    pub fn swap_with(&mut self, x: i32, y: i32) -> bool {
        if !self.grid.in_bounds(x, y) || self.grid.get(self.x, self.y).is_none() {
            return false;
        }
        self.grid.set_processed(self.x, self.y, true);
        self.grid.set_processed(x, y, true);
        if self.grid.swap(self.x, self.y, x, y) {
            self.x = x;
            self.y = y;
            true
        } else {
            false
        }
    }

    /// Queue an effect at `origin`, released `delay` frames from now.
    pub fn schedule(&mut self, kind: EffectKind, origin: (i32, i32), delay: u32) -> u64 {
        self.effects.schedule(kind, origin, delay)
    }
}
