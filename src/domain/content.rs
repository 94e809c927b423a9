use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::domain::element::ElementDefaults;
use crate::domain::particle::Phase;
use crate::domain::registry::ElementRegistry;
use crate::systems::behaviors::BehaviorKind;

const BUILTIN_BUNDLE: &str = include_str!("../../content/elements.json");

pub const FORMAT_VERSION: u32 = 1;

/// Parsed element catalogue. Turn it into an `ElementRegistry` with
/// `into_registry`.
#[derive(Clone, Debug)]
pub struct ContentBundle {
    elements: Vec<ElementDefaults>,
}

impl ContentBundle {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let bundle: BundleRoot = serde_json::from_str(json)?;
        Self::from_bundle(bundle)
    }

    /// Catalogue shipped with the crate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json(BUILTIN_BUNDLE)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[ElementDefaults] {
        &self.elements
    }

    pub fn get(&self, name: &str) -> Option<&ElementDefaults> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// Small JSON listing for UI palettes: name, phase and behavior kind.
    pub fn manifest_json(&self) -> String {
        let out = ContentManifest {
            format_version: FORMAT_VERSION,
            elements: self
                .elements
                .iter()
                .map(|e| ContentManifestElement {
                    name: &e.name,
                    phase: e.phase,
                    behavior: &e.behavior,
                })
                .collect(),
        };
        serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
    }

    /// Resolve every behavior kind and register all elements, then check
    /// that every element named in a rule exists.
    pub fn into_registry(self) -> Result<ElementRegistry, ConfigError> {
        let mut registry = ElementRegistry::new();
        for defaults in self.elements {
            let kind = BehaviorKind::parse(&defaults.name, &defaults.behavior)?;
            registry.register(defaults, kind.build())?;
        }
        registry.check_references()?;
        log::info!("element registry ready: {} elements", registry.len());
        Ok(registry)
    }

    fn from_bundle(bundle: BundleRoot) -> Result<Self, ConfigError> {
        if bundle.format_version != FORMAT_VERSION {
            return Err(ConfigError::Bundle(format!(
                "unsupported format version {}",
                bundle.format_version
            )));
        }
        let mut seen = HashSet::new();
        for el in bundle.elements.iter() {
            el.validate()?;
            if !seen.insert(el.name.as_str()) {
                return Err(ConfigError::DuplicateElement(el.name.clone()));
            }
        }
        Ok(Self { elements: bundle.elements })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentManifest<'a> {
    format_version: u32,
    elements: Vec<ContentManifestElement<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentManifestElement<'a> {
    name: &'a str,
    phase: Phase,
    behavior: &'a str,
}

fn default_format_version() -> u32 {
    FORMAT_VERSION
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleRoot {
    #[serde(default = "default_format_version")]
    format_version: u32,
    elements: Vec<ElementDefaults>,
}
