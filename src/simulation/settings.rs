use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

/// Order in which the scan phase visits rows. Within a row cells are
/// visited left to right (right to left on odd ticks with `alternate_rows`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScanOrder {
    #[default]
    TopDown,
    BottomUp,
}

fn default_seed() -> u64 {
    0x5EED
}

fn default_liquid_reach() -> u32 {
    4
}

fn default_gas_drift_chance() -> f32 {
    0.3
}

fn default_density_swap_threshold() -> f32 {
    0.05
}

fn default_ambient_temperature() -> f32 {
    25.0
}

fn default_heat_exchange_scale() -> f32 {
    0.125
}

fn default_max_effects_per_flush() -> usize {
    4096
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimSettings {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub scan_order: ScanOrder,
    #[serde(default)]
    pub alternate_rows: bool,
    #[serde(default = "default_liquid_reach")]
    pub liquid_reach: u32,
    #[serde(default = "default_gas_drift_chance")]
    pub gas_drift_chance: f32,
    #[serde(default = "default_density_swap_threshold")]
    pub density_swap_threshold: f32,
    #[serde(default = "default_ambient_temperature")]
    pub ambient_temperature: f32,
    /// Multiplier on pairwise conductivity; keep <= 0.5 so exchanges never
    /// overshoot
    #[serde(default = "default_heat_exchange_scale")]
    pub heat_exchange_scale: f32,
    #[serde(default = "default_max_effects_per_flush")]
    pub max_effects_per_flush: usize,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            scan_order: ScanOrder::default(),
            alternate_rows: false,
            liquid_reach: default_liquid_reach(),
            gas_drift_chance: default_gas_drift_chance(),
            density_swap_threshold: default_density_swap_threshold(),
            ambient_temperature: default_ambient_temperature(),
            heat_exchange_scale: default_heat_exchange_scale(),
            max_effects_per_flush: default_max_effects_per_flush(),
        }
    }
}

impl SimSettings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: SimSettings =
            serde_json::from_str(json).map_err(|e| ConfigError::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let bad = |msg: &str| Err(ConfigError::Settings(msg.to_string()));
        if self.liquid_reach == 0 {
            return bad("liquidReach must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.gas_drift_chance) {
            return bad("gasDriftChance must be within [0, 1]");
        }
        if self.density_swap_threshold.is_nan() || self.density_swap_threshold < 0.0 {
            return bad("densitySwapThreshold must be non-negative");
        }
        if !(0.0..=0.5).contains(&self.heat_exchange_scale) {
            return bad("heatExchangeScale must be within [0, 0.5]");
        }
        if !self.ambient_temperature.is_finite() {
            return bad("ambientTemperature must be finite");
        }
        if self.max_effects_per_flush == 0 {
            return bad("maxEffectsPerFlush must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let s = SimSettings::from_json("{}").unwrap();
        assert_eq!(s, SimSettings::default());
        assert_eq!(s.seed, 0x5EED);
        assert_eq!(s.scan_order, ScanOrder::TopDown);
    }

    #[test]
    fn camel_case_fields() {
        let s = SimSettings::from_json(
            r#"{"seed":7,"scanOrder":"bottomUp","alternateRows":true,"liquidReach":2}"#,
        )
        .unwrap();
        assert_eq!(s.seed, 7);
        assert_eq!(s.scan_order, ScanOrder::BottomUp);
        assert!(s.alternate_rows);
        assert_eq!(s.liquid_reach, 2);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for json in [
            r#"{"liquidReach":0}"#,
            r#"{"gasDriftChance":1.5}"#,
            r#"{"densitySwapThreshold":-1}"#,
            r#"{"heatExchangeScale":0.9}"#,
            r#"{"maxEffectsPerFlush":0}"#,
            r#"{"scanOrder":"sideways"}"#,
        ] {
            assert!(
                matches!(SimSettings::from_json(json), Err(ConfigError::Settings(_))),
                "{json} accepted"
            );
        }
    }
}
