//! Movement and interaction primitives shared by every element behavior.
//!
//! All of them take the `StepContext` of the particle being stepped, no-op
//! on out-of-bounds targets, and never place a particle onto an occupied
//! cell (moves go through `Grid::move_particle` or a full swap).

mod context;

pub mod chance;
pub mod density;
pub mod electric;
pub mod explosion;
pub mod gas;
pub mod gravity;
pub mod heat;
pub mod liquid;
pub mod transform;

pub use chance::{catch_fire, corrode, ignite, react, with_probability};
pub use context::StepContext;
pub use density::try_density_swap;
pub use electric::{conduct, energize};
pub use explosion::{apply_blast, compute_blast, detonate, BlastOp, BlastPlan, ExplosionSpec};
pub use gas::rise;
pub use gravity::fall;
pub use heat::{apply_phase_change, diffuse_heat, exchange_ambient, thermal_step};
pub use liquid::flow;
pub use transform::{spawn, transform, transform_self, Heat};

/// Up, left, right, down.
pub const NEIGHBORS_4: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// Row-major around the centre.
pub const NEIGHBORS_8: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
