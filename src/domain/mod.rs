pub mod content;
pub mod element;
pub mod particle;
pub mod registry;

pub use element::{ElementBehavior, ElementDefaults, EMPTY};
pub use particle::{ExtValue, Extras, Particle, ParticleOverrides, Phase};
pub use registry::ElementRegistry;
