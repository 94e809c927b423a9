//! Core plumbing shared by every layer: errors, logging, randomness, timing.

pub mod error;
pub mod logging;
pub mod rng;
pub(crate) mod timer;

pub use error::{ConfigError, EffectFault, StepFault};
pub use rng::SimRng;
