pub mod behaviors;
pub mod effects;
pub mod primitives;

pub use primitives::StepContext;
