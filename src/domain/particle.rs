//! Particle - the mutable record held by one grid cell.
//!
//! Common physical fields are typed so every primitive can rely on them; the
//! `extras` bag carries element-specific state (potency, fuse timers, burn
//! counters...) with an open schema. Moving a particle moves the whole value,
//! bag included.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Matter phase. Solid particles only move when they are not static.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Solid,
    Powder,
    Liquid,
    Gas,
}

/// A single value in the extension bag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Element-specific mutable fields. Ordered so iteration is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Extras(BTreeMap<String, ExtValue>);

impl Extras {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ExtValue> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: &str, value: ExtValue) {
        self.0.insert(key.to_string(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<ExtValue> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric read; integers widen to float.
    pub fn float(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            ExtValue::Float(v) => Some(*v),
            ExtValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        match self.0.get(key)? {
            ExtValue::Int(v) => Some(*v),
            ExtValue::Float(v) => Some(*v as i64),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(ExtValue::Bool(true)))
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key)? {
            ExtValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn set_float(&mut self, key: &str, v: f64) {
        self.set(key, ExtValue::Float(v));
    }

    pub fn set_int(&mut self, key: &str, v: i64) {
        self.set(key, ExtValue::Int(v));
    }

    pub fn set_flag(&mut self, key: &str, v: bool) {
        self.set(key, ExtValue::Bool(v));
    }

    /// Merge `other` over self (later wins).
    pub fn extend_from(&mut self, other: &Extras) {
        for (k, v) in other.0.iter() {
            self.0.insert(k.clone(), v.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// The record occupying one cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Key into the element registry
    pub kind: String,
    pub temperature: f32,
    pub density: f32,
    pub phase: Phase,
    pub is_static: bool,
    pub flammable: bool,
    pub conductive: bool,
    pub corrosive: bool,
    /// Set by the scheduler before `step` runs; see `simulation::step`
    pub processed: bool,
    pub extras: Extras,
}

impl Particle {
    /// Bare particle with neutral physics. Normally built through
    /// `ElementRegistry::instantiate`.
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            temperature: 25.0,
            density: 1.0,
            phase: Phase::Solid,
            is_static: true,
            flammable: false,
            conductive: false,
            corrosive: false,
            processed: false,
            extras: Extras::new(),
        }
    }

    #[inline]
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    #[inline]
    pub fn is_gas(&self) -> bool {
        self.phase == Phase::Gas
    }

    #[inline]
    pub fn is_liquid(&self) -> bool {
        self.phase == Phase::Liquid
    }

    #[inline]
    pub fn is_powder(&self) -> bool {
        self.phase == Phase::Powder
    }

    #[inline]
    pub fn is_solid(&self) -> bool {
        self.phase == Phase::Solid
    }

    /// Liquids and gases.
    #[inline]
    pub fn is_fluid(&self) -> bool {
        matches!(self.phase, Phase::Liquid | Phase::Gas)
    }

    /// Can be pushed around by movement primitives.
    #[inline]
    pub fn is_movable(&self) -> bool {
        !self.is_static
    }
}

/// Per-instance overrides applied on top of element defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleOverrides {
    pub temperature: Option<f32>,
    pub density: Option<f32>,
    pub is_static: Option<bool>,
    pub flammable: Option<bool>,
    pub conductive: Option<bool>,
    pub corrosive: Option<bool>,
    pub extras: Extras,
}

impl ParticleOverrides {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_temperature(temperature: f32) -> Self {
        Self { temperature: Some(temperature), ..Self::default() }
    }

    pub(crate) fn apply(&self, p: &mut Particle) {
        if let Some(t) = self.temperature {
            p.temperature = t;
        }
        if let Some(d) = self.density {
            p.density = d;
        }
        if let Some(s) = self.is_static {
            p.is_static = s;
        }
        if let Some(f) = self.flammable {
            p.flammable = f;
        }
        if let Some(c) = self.conductive {
            p.conductive = c;
        }
        if let Some(c) = self.corrosive {
            p.corrosive = c;
        }
        p.extras.extend_from(&self.extras);
    }
}
