//! Error types for the engine.
//!
//! Configuration problems are reported, never panicked on; per-particle and
//! per-effect faults are isolated by the scheduler and only surface in logs
//! and tick stats.

use std::any::Any;

use thiserror::Error;

/// Startup / registry / settings problems.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("element `{0}` is already registered")]
    DuplicateElement(String),

    #[error("unknown element type `{0}`")]
    UnknownElement(String),

    /// Types referenced by particles or content but missing from the registry
    #[error("{count} unregistered element type(s): {}", names.join(", "))]
    Unregistered { count: usize, names: Vec<String> },

    #[error("unknown behavior `{behavior}` for element `{element}`")]
    UnknownBehavior { element: String, behavior: String },

    #[error("invalid content bundle: {0}")]
    Bundle(String),

    #[error("invalid settings: {0}")]
    Settings(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Bundle(e.to_string())
    }
}

/// Raised by an element's `step`; caught by the scheduler.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StepFault {
    #[error("no particle at ({x}, {y})")]
    Vacant { x: i32, y: i32 },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Rule(String),
}

/// Raised while applying a deferred effect; the effect is skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EffectFault {
    #[error("effect origin ({x}, {y}) is out of bounds")]
    OutOfBounds { x: i32, y: i32 },

    #[error("effect origin ({x}, {y}) no longer holds `{expected}`")]
    OriginGone { x: i32, y: i32, expected: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("panicked: {0}")]
    Panicked(String),
}

/// Text of a caught panic payload.
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_lists_names() {
        let e = ConfigError::Unregistered {
            count: 2,
            names: vec!["plasma".to_string(), "virus".to_string()],
        };
        assert_eq!(e.to_string(), "2 unregistered element type(s): plasma, virus");
    }

    #[test]
    fn step_fault_wraps_config() {
        let f: StepFault = ConfigError::UnknownElement("tar".into()).into();
        assert_eq!(f.to_string(), "unknown element type `tar`");
    }
}
