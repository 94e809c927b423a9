//! Elementa Engine - falling-sand cellular automaton for the Elementa sandbox
//!
//! Architecture:
//! - core/        - errors, logging, seeded RNG, timing
//! - spatial/     - the grid of optional particles
//! - domain/      - particles, element descriptors, registry, content bundle
//! - systems/     - movement/interaction primitives, deferred effects, behaviors
//! - simulation/  - tick scheduler, settings, host commands, wasm facade

pub mod core;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod simulation;

pub use crate::core::error::{ConfigError, EffectFault, StepFault};
pub use domain::content::ContentBundle;
pub use domain::element::{ElementBehavior, ElementDefaults};
pub use domain::particle::{Particle, ParticleOverrides, Phase};
pub use domain::registry::ElementRegistry;
pub use simulation::{Sandbox, SimSettings, Simulation, TickStats};
pub use spatial::Grid;
pub use systems::effects::EffectKind;
pub use systems::StepContext;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine: panic hook and console logging
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    if crate::core::logging::init(log::LevelFilter::Info) {
        log::info!("Elementa engine {} initialized", version());
    }
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
