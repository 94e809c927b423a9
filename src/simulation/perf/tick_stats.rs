use wasm_bindgen::prelude::*;

/// Counters for the most recent tick.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickStats {
    pub(crate) frame: u64,
    pub(crate) particles_processed: u32,
    pub(crate) step_faults: u32,
    pub(crate) unknown_skipped: u32,
    pub(crate) effects_applied: u32,
    pub(crate) effects_skipped: u32,
    pub(crate) effects_pending: u32,
    pub(crate) particle_count: u32,
    pub(crate) tick_ms: f64,
}

#[wasm_bindgen]
impl TickStats {
    /// Frame number the stats belong to
    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.frame }

    /// Particles whose `step` ran
    #[wasm_bindgen(getter)]
    pub fn particles_processed(&self) -> u32 { self.particles_processed }

    #[wasm_bindgen(getter)]
    pub fn step_faults(&self) -> u32 { self.step_faults }

    /// Particles left inert because their type is not registered
    #[wasm_bindgen(getter)]
    pub fn unknown_skipped(&self) -> u32 { self.unknown_skipped }

    #[wasm_bindgen(getter)]
    pub fn effects_applied(&self) -> u32 { self.effects_applied }

    #[wasm_bindgen(getter)]
    pub fn effects_skipped(&self) -> u32 { self.effects_skipped }

    #[wasm_bindgen(getter)]
    pub fn effects_pending(&self) -> u32 { self.effects_pending }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.particle_count }

    #[wasm_bindgen(getter)]
    pub fn tick_ms(&self) -> f64 { self.tick_ms }
}
