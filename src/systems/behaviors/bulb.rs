use crate::core::error::StepFault;
use crate::domain::element::ElementBehavior;
use crate::systems::primitives::electric::charge_of;
use crate::systems::primitives::StepContext;

use super::common::settle;

/// Set while the bulb carries charge.
pub const LIT: &str = "lit";
/// 0..=1, ramps up while lit and back down when dark.
pub const BRIGHTNESS: &str = "brightness";

const RAMP: f64 = 0.2;
const WARM_RATE: f32 = 0.5;
const WARM_LIMIT: f32 = 60.0;

/// A conductor that lights and warms while charged. Breaking from heat is
/// left to the element's phase change.
pub struct BulbBehavior;

impl ElementBehavior for BulbBehavior {
    fn step(&self, ctx: &mut StepContext<'_>) -> Result<(), StepFault> {
        if settle(ctx)? {
            return Ok(());
        }
        let p = ctx.particle_mut()?;
        let lit = charge_of(p) > 0;
        let brightness = p.extras.float(BRIGHTNESS).unwrap_or(0.0);
        let brightness = if lit {
            (brightness + RAMP).min(1.0)
        } else {
            (brightness - RAMP).max(0.0)
        };
        p.extras.set_float(BRIGHTNESS, brightness);
        p.extras.set_flag(LIT, lit);
        if lit && p.temperature < WARM_LIMIT {
            p.temperature = (p.temperature + WARM_RATE).min(WARM_LIMIT);
        }
        Ok(())
    }
}
