//! Element registry: type name -> (defaults, behavior).
//!
//! Built once at startup and handed to the simulation by value; there is no
//! global registry.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use crate::core::error::ConfigError;
use crate::core::rng::SimRng;
use crate::domain::element::{ElementBehavior, ElementDefaults, EMPTY};
use crate::domain::particle::{Particle, ParticleOverrides};
use crate::spatial::Grid;

#[derive(Clone)]
pub struct ElementEntry {
    pub defaults: ElementDefaults,
    behavior: Arc<dyn ElementBehavior>,
}

impl ElementEntry {
    #[inline]
    pub fn behavior(&self) -> &Arc<dyn ElementBehavior> {
        &self.behavior
    }
}

impl fmt::Debug for ElementEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementEntry")
            .field("name", &self.defaults.name)
            .field("behavior", &self.defaults.behavior)
            .finish()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ElementRegistry {
    entries: BTreeMap<String, ElementEntry>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one element. A second registration under the same name is
    /// rejected and the first one stays in place.
    pub fn register(
        &mut self,
        defaults: ElementDefaults,
        behavior: Arc<dyn ElementBehavior>,
    ) -> Result<(), ConfigError> {
        defaults.validate()?;
        if self.entries.contains_key(&defaults.name) {
            log::error!("duplicate registration of element `{}`", defaults.name);
            return Err(ConfigError::DuplicateElement(defaults.name));
        }
        self.entries.insert(defaults.name.clone(), ElementEntry { defaults, behavior });
        Ok(())
    }

    pub fn lookup(&self, kind: &str) -> Result<&ElementEntry, ConfigError> {
        self.entries
            .get(kind)
            .ok_or_else(|| ConfigError::UnknownElement(kind.to_string()))
    }

    #[inline]
    pub fn defaults(&self, kind: &str) -> Option<&ElementDefaults> {
        self.entries.get(kind).map(|e| &e.defaults)
    }

    #[inline]
    pub fn contains(&self, kind: &str) -> bool {
        self.entries.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// defaults -> overrides -> `on_create`.
    ///
    /// The result is already marked processed: a particle created during a
    /// scan first runs on the tick after its creation.
    pub fn instantiate(
        &self,
        kind: &str,
        overrides: &ParticleOverrides,
        rng: &mut SimRng,
    ) -> Result<Particle, ConfigError> {
        let entry = self.lookup(kind)?;
        let mut particle = entry.defaults.base_particle();
        overrides.apply(&mut particle);
        entry.behavior.on_create(&mut particle, &entry.defaults, rng);
        particle.processed = true;
        Ok(particle)
    }

    /// Names that are referenced but not registered.
    pub fn missing<'n, I>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'n str>,
    {
        let mut missing = BTreeSet::new();
        for name in names {
            if name != EMPTY && !self.entries.contains_key(name) {
                missing.insert(name.to_string());
            }
        }
        missing.into_iter().collect()
    }

    /// Every element named by another element's rules must be registered.
    pub fn check_references(&self) -> Result<(), ConfigError> {
        let referenced = self
            .entries
            .values()
            .flat_map(|e| e.defaults.referenced_names());
        report(self.missing(referenced))
    }

    /// Every particle currently on the grid must have a registered type.
    pub fn validate_grid(&self, grid: &Grid) -> Result<(), ConfigError> {
        report(self.missing(grid.iter().map(|(_, _, p)| p.kind.as_str())))
    }
}

fn report(names: Vec<String>) -> Result<(), ConfigError> {
    if names.is_empty() {
        return Ok(());
    }
    let err = ConfigError::Unregistered { count: names.len(), names };
    log::error!("{}", err);
    Err(err)
}
