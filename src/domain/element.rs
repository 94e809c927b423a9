//! Element descriptors: the immutable defaults and behavior shared by every
//! particle of one type.
//!
//! Defaults are plain data (deserialized from the content bundle); the
//! per-tick policy lives behind the `ElementBehavior` trait.

use serde::{Deserialize, Serialize};

use crate::core::error::{ConfigError, StepFault};
use crate::core::rng::SimRng;
use crate::domain::particle::{Extras, Particle, Phase};
use crate::systems::primitives::StepContext;

/// Transform target meaning "destroy the particle".
pub const EMPTY: &str = "empty";

fn one() -> f32 {
    1.0
}

fn room_temperature() -> f32 {
    25.0
}

fn ignition_point() -> f32 {
    300.0
}

fn static_kind() -> String {
    "static".to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDefaults {
    pub name: String,
    /// Behavior kind, see `systems::behaviors::BehaviorKind`
    #[serde(default = "static_kind")]
    pub behavior: String,
    #[serde(default)]
    pub phase: Phase,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default = "one")]
    pub density: f32,
    #[serde(default = "room_temperature")]
    pub temperature: f32,
    #[serde(default)]
    pub flammable: bool,
    #[serde(default)]
    pub conductive: bool,
    #[serde(default)]
    pub corrosive: bool,

    /// Heat exchange weight with neighbours, 0..=1
    #[serde(default)]
    pub conductivity: f32,
    /// Pull toward ambient temperature per tick, 0..=1
    #[serde(default)]
    pub ambient_exchange: f32,
    #[serde(default)]
    pub corrosion_resistance: f32,
    #[serde(default)]
    pub blast_resistance: f32,
    /// Probability a liquid attempts to flow this tick (viscosity)
    #[serde(default = "one")]
    pub flow_chance: f32,
    /// Liquid spread override; falls back to `SimSettings::liquid_reach`
    #[serde(default)]
    pub reach: Option<u32>,

    #[serde(default)]
    pub phase_change: PhaseChange,
    #[serde(default)]
    pub reactions: Vec<ReactionRule>,
    #[serde(default)]
    pub ignition: Option<Ignition>,
    #[serde(default)]
    pub explosive: Option<ExplosiveSpec>,
    #[serde(default)]
    pub lifetime: Option<Lifetime>,
    #[serde(default)]
    pub spawns: Option<SpawnRule>,

    /// Initial extension bag copied into every new particle
    #[serde(default)]
    pub extras: Extras,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<PhaseEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<PhaseEndpoint>,
}

/// `high`: becomes `to` when temperature >= `temp`.
/// `low`: becomes `to` when temperature <= `temp`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseEndpoint {
    pub temp: f32,
    pub to: String,
}

impl PhaseChange {
    pub fn check(&self, temperature: f32) -> Option<&str> {
        if let Some(h) = &self.high {
            if temperature >= h.temp {
                return Some(h.to.as_str());
            }
        }
        if let Some(l) = &self.low {
            if temperature <= l.temp {
                return Some(l.to.as_str());
            }
        }
        None
    }
}

/// Contact reaction. `becomes` replaces this particle, `other_becomes` the
/// neighbour; `None` leaves that side untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionRule {
    pub with: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub becomes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_becomes: Option<String>,
    #[serde(default = "one")]
    pub chance: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ignition {
    /// Per-tick probability once lit by a neighbour or by heat
    pub chance: f32,
    /// Self-ignition temperature
    #[serde(default = "ignition_point")]
    pub point: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burn_duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burns_into: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplosiveSpec {
    pub radius: u32,
    #[serde(default = "one")]
    pub power: f32,
    /// Tick range for the fuse; absent means "detonate at the next flush"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuse: Option<TickRange>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lifetime {
    pub min: u32,
    pub max: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fades_into: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnRule {
    pub element: String,
    #[serde(default = "one")]
    pub chance: f32,
    #[serde(default)]
    pub direction: Direction,
}

impl ElementDefaults {
    /// Minimal descriptor; mostly for tests and programmatic registration.
    pub fn new(name: &str, phase: Phase) -> Self {
        Self {
            name: name.to_string(),
            behavior: static_kind(),
            phase,
            is_static: phase == Phase::Solid,
            density: 1.0,
            temperature: room_temperature(),
            flammable: false,
            conductive: false,
            corrosive: false,
            conductivity: 0.0,
            ambient_exchange: 0.0,
            corrosion_resistance: 0.0,
            blast_resistance: 0.0,
            flow_chance: 1.0,
            reach: None,
            phase_change: PhaseChange::default(),
            reactions: Vec::new(),
            ignition: None,
            explosive: None,
            lifetime: None,
            spawns: None,
            extras: Extras::new(),
        }
    }

    /// Particle carrying these defaults, before overrides and `on_create`.
    pub fn base_particle(&self) -> Particle {
        Particle {
            kind: self.name.clone(),
            temperature: self.temperature,
            density: self.density,
            phase: self.phase,
            is_static: self.is_static,
            flammable: self.flammable,
            conductive: self.conductive,
            corrosive: self.corrosive,
            processed: false,
            extras: self.extras.clone(),
        }
    }

    pub fn reaction_with(&self, other: &str) -> Option<&ReactionRule> {
        self.reactions.iter().find(|r| r.with == other)
    }

    /// Every element name this descriptor can turn something into or
    /// reacts with. Used for startup validation.
    pub fn referenced_names(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        if let Some(h) = &self.phase_change.high {
            out.push(&h.to);
        }
        if let Some(l) = &self.phase_change.low {
            out.push(&l.to);
        }
        for r in &self.reactions {
            out.push(&r.with);
            out.extend(r.becomes.as_deref());
            out.extend(r.other_becomes.as_deref());
        }
        if let Some(i) = &self.ignition {
            out.extend(i.burns_into.as_deref());
        }
        if let Some(l) = &self.lifetime {
            out.extend(l.fades_into.as_deref());
        }
        if let Some(s) = &self.spawns {
            out.push(&s.element);
        }
        out.retain(|n| *n != EMPTY);
        out
    }

    /// Range checks on the numeric constants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bad = |what: &str| {
            Err(ConfigError::Bundle(format!("element `{}`: {}", self.name, what)))
        };
        if self.name.is_empty() || self.name == EMPTY {
            return bad("reserved or empty name");
        }
        let unit = |v: f32| (0.0..=1.0).contains(&v);
        if !unit(self.conductivity) {
            return bad("conductivity must be within [0, 1]");
        }
        if !unit(self.ambient_exchange) {
            return bad("ambientExchange must be within [0, 1]");
        }
        if !unit(self.corrosion_resistance) || !unit(self.blast_resistance) {
            return bad("resistances must be within [0, 1]");
        }
        if !unit(self.flow_chance) {
            return bad("flowChance must be within [0, 1]");
        }
        if !self.density.is_finite() || !self.temperature.is_finite() {
            return bad("density and temperature must be finite");
        }
        if self.reactions.iter().any(|r| !unit(r.chance)) {
            return bad("reaction chance must be within [0, 1]");
        }
        if let Some(i) = &self.ignition {
            if !unit(i.chance) {
                return bad("ignition chance must be within [0, 1]");
            }
        }
        if let Some(l) = &self.lifetime {
            if l.min > l.max {
                return bad("lifetime min exceeds max");
            }
        }
        if let Some(e) = &self.explosive {
            if e.radius == 0 {
                return bad("explosive radius must be positive");
            }
            if let Some(f) = e.fuse {
                if f.min > f.max {
                    return bad("fuse min exceeds max");
                }
            }
        }
        if let Some(s) = &self.spawns {
            if !unit(s.chance) {
                return bad("spawn chance must be within [0, 1]");
            }
        }
        Ok(())
    }
}

/// Per-type policy. One instance is shared by all particles of the type.
///
/// The scheduler marks the particle processed before `step` is called;
/// implementations never decide on their own whether to skip.
pub trait ElementBehavior: Send + Sync {
    /// Fill extension-bag defaults. Runs once per instantiation, after
    /// defaults and overrides; keys already present must be kept.
    fn on_create(&self, _particle: &mut Particle, _defaults: &ElementDefaults, _rng: &mut SimRng) {}

    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), StepFault>;
}
