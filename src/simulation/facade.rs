use std::sync::Arc;

use wasm_bindgen::prelude::*;

use crate::domain::content::ContentBundle;

use super::{SimSettings, Simulation, TickStats};

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// JS-facing handle over a `Simulation`.
#[wasm_bindgen]
pub struct Sandbox {
    core: Simulation,
}

#[wasm_bindgen]
impl Sandbox {
    /// Built-in elements, default settings
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<Sandbox, JsValue> {
        let core = Simulation::new(width, height).map_err(js_err)?;
        Ok(Self { core })
    }

    /// Built-in elements with settings from JSON (camelCase keys, all optional)
    #[wasm_bindgen(js_name = fromSettingsJson)]
    pub fn from_settings_json(width: u32, height: u32, settings: &str) -> Result<Sandbox, JsValue> {
        let settings = SimSettings::from_json(settings).map_err(js_err)?;
        let registry = ContentBundle::builtin()
            .and_then(ContentBundle::into_registry)
            .map_err(js_err)?;
        let core = Simulation::with_settings(width, height, settings, Arc::new(registry))
            .map_err(js_err)?;
        Ok(Self { core })
    }

    /// Custom element catalogue plus settings
    #[wasm_bindgen(js_name = fromContentJson)]
    pub fn from_content_json(
        width: u32,
        height: u32,
        content: &str,
        settings: &str,
    ) -> Result<Sandbox, JsValue> {
        let settings = SimSettings::from_json(settings).map_err(js_err)?;
        let registry = ContentBundle::from_json(content)
            .and_then(ContentBundle::into_registry)
            .map_err(js_err)?;
        let core = Simulation::with_settings(width, height, settings, Arc::new(registry))
            .map_err(js_err)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter, js_name = particleCount)]
    pub fn particle_count(&self) -> u32 { self.core.particle_count() as u32 }

    /// Advance one tick
    pub fn tick(&mut self) {
        self.core.tick();
    }

    /// Stats of the last tick
    #[wasm_bindgen(getter)]
    pub fn stats(&self) -> TickStats {
        self.core.stats()
    }

    /// Returns false when the cell is taken or out of bounds, or the
    /// element is unknown
    #[wasm_bindgen(js_name = addParticle)]
    pub fn add_particle(&mut self, x: i32, y: i32, kind: &str) -> bool {
        match self.core.add_particle(x, y, kind) {
            Ok(placed) => placed,
            Err(e) => {
                log::warn!("addParticle: {}", e);
                false
            }
        }
    }

    /// Brush placement; returns the number of particles placed
    #[wasm_bindgen(js_name = addParticlesInRadius)]
    pub fn add_particles_in_radius(&mut self, cx: i32, cy: i32, radius: i32, kind: &str) -> u32 {
        match self.core.add_particles_in_radius(cx, cy, radius, kind) {
            Ok(n) => n,
            Err(e) => {
                log::warn!("addParticlesInRadius: {}", e);
                0
            }
        }
    }

    #[wasm_bindgen(js_name = removeParticle)]
    pub fn remove_particle(&mut self, x: i32, y: i32) -> bool {
        self.core.remove_particle(x, y)
    }

    #[wasm_bindgen(js_name = removeParticlesInRadius)]
    pub fn remove_particles_in_radius(&mut self, cx: i32, cy: i32, radius: i32) -> u32 {
        self.core.remove_particles_in_radius(cx, cy, radius)
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Element name at a cell, `undefined` when empty
    #[wasm_bindgen(js_name = kindAt)]
    pub fn kind_at(&self, x: i32, y: i32) -> Option<String> {
        self.core.grid().kind_at(x, y).map(str::to_string)
    }

    #[wasm_bindgen(js_name = temperatureAt)]
    pub fn temperature_at(&self, x: i32, y: i32) -> Option<f32> {
        self.core.grid().get(x, y).map(|p| p.temperature)
    }

    /// Empty string when everything is registered, otherwise the problem
    #[wasm_bindgen(js_name = validationReport)]
    pub fn validation_report(&self) -> String {
        match self.core.validate() {
            Ok(()) => String::new(),
            Err(e) => e.to_string(),
        }
    }

    /// Registered element names, comma separated, sorted
    #[wasm_bindgen(js_name = elementNames)]
    pub fn element_names(&self) -> String {
        self.core.registry().names().collect::<Vec<_>>().join(",")
    }
}
