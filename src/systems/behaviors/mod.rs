//! Built-in element behaviors.
//!
//! Each is a thin policy over `systems::primitives`; which one an element
//! uses is named by the `behavior` field of its content-bundle entry.

mod acid;
mod battery;
mod bulb;
mod burning;
mod common;
mod explosive;
mod fire;
mod gas;
mod liquid;
mod plant;
mod powder;
mod solid;
mod spawner;

pub use acid::AcidBehavior;
pub use battery::{BatteryBehavior, POWER};
pub use bulb::{BulbBehavior, BRIGHTNESS, LIT};
pub use burning::BurningBehavior;
pub use common::LIFE;
pub use explosive::{ExplosiveBehavior, ARMED};
pub use fire::FireBehavior;
pub use gas::GasBehavior;
pub use liquid::LiquidBehavior;
pub use plant::{PlantBehavior, GROWTH, HYDRATION};
pub use powder::PowderBehavior;
pub use solid::StaticBehavior;
pub use spawner::SpawnerBehavior;

use std::sync::Arc;

use crate::core::error::ConfigError;
use crate::domain::element::ElementBehavior;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BehaviorKind {
    Static,
    Powder,
    Liquid,
    Acid,
    Gas,
    Fire,
    Burning,
    Explosive,
    Spawner,
    Battery,
    Bulb,
    Plant,
}

impl BehaviorKind {
    pub const ALL: [BehaviorKind; 12] = [
        BehaviorKind::Static,
        BehaviorKind::Powder,
        BehaviorKind::Liquid,
        BehaviorKind::Acid,
        BehaviorKind::Gas,
        BehaviorKind::Fire,
        BehaviorKind::Burning,
        BehaviorKind::Explosive,
        BehaviorKind::Spawner,
        BehaviorKind::Battery,
        BehaviorKind::Bulb,
        BehaviorKind::Plant,
    ];

    /// Resolve the `behavior` string of `element`.
    pub fn parse(element: &str, s: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownBehavior {
                element: element.to_string(),
                behavior: s.to_string(),
            })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BehaviorKind::Static => "static",
            BehaviorKind::Powder => "powder",
            BehaviorKind::Liquid => "liquid",
            BehaviorKind::Acid => "acid",
            BehaviorKind::Gas => "gas",
            BehaviorKind::Fire => "fire",
            BehaviorKind::Burning => "burning",
            BehaviorKind::Explosive => "explosive",
            BehaviorKind::Spawner => "spawner",
            BehaviorKind::Battery => "battery",
            BehaviorKind::Bulb => "bulb",
            BehaviorKind::Plant => "plant",
        }
    }

    pub fn build(self) -> Arc<dyn ElementBehavior> {
        match self {
            BehaviorKind::Static => Arc::new(StaticBehavior),
            BehaviorKind::Powder => Arc::new(PowderBehavior),
            BehaviorKind::Liquid => Arc::new(LiquidBehavior),
            BehaviorKind::Acid => Arc::new(AcidBehavior),
            BehaviorKind::Gas => Arc::new(GasBehavior),
            BehaviorKind::Fire => Arc::new(FireBehavior),
            BehaviorKind::Burning => Arc::new(BurningBehavior),
            BehaviorKind::Explosive => Arc::new(ExplosiveBehavior),
            BehaviorKind::Spawner => Arc::new(SpawnerBehavior),
            BehaviorKind::Battery => Arc::new(BatteryBehavior),
            BehaviorKind::Bulb => Arc::new(BulbBehavior),
            BehaviorKind::Plant => Arc::new(PlantBehavior),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_round_trips_through_its_name() {
        for kind in BehaviorKind::ALL {
            assert_eq!(BehaviorKind::parse("x", kind.as_str()), Ok(kind));
        }
    }

    #[test]
    fn unknown_kind_names_the_element() {
        assert_eq!(
            BehaviorKind::parse("goo", "slime"),
            Err(ConfigError::UnknownBehavior { element: "goo".into(), behavior: "slime".into() })
        );
    }
}
