use std::ops::RangeInclusive;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::core::error::{panic_message, EffectFault};
use crate::core::rng::SimRng;
use crate::domain::particle::ParticleOverrides;
use crate::domain::registry::ElementRegistry;
use crate::spatial::Grid;
use crate::systems::primitives::explosion::{apply_blast, compute_blast};

use super::queue::{DeferredEffect, EffectKind, EffectQueue};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlushReport {
    pub applied: u32,
    pub skipped: u32,
}

/// Apply every effect due this frame (up to `limit`), in enqueue order.
/// A failing or panicking effect is logged and skipped; the rest still run.
/// Effects queued while flushing wait for a later flush.
pub fn flush(
    grid: &mut Grid,
    registry: &ElementRegistry,
    effects: &mut EffectQueue,
    rng: &mut SimRng,
    limit: usize,
) -> FlushReport {
    let mut report = FlushReport::default();
    let batch = effects.take_due(limit);
    for effect in batch {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            apply_effect(grid, registry, effects, rng, &effect)
        }))
        .unwrap_or_else(|panic| Err(EffectFault::Panicked(panic_message(&*panic).to_string())));
        match outcome {
            Ok(()) => report.applied += 1,
            Err(e) => {
                log::warn!(
                    "skipped {} effect #{} at ({}, {}): {}",
                    effect.kind.label(),
                    effect.seq(),
                    effect.origin.0,
                    effect.origin.1,
                    e
                );
                report.skipped += 1;
            }
        }
    }
    report
}

fn expect_at(grid: &Grid, origin: (i32, i32), expect: &Option<String>) -> Result<(), EffectFault> {
    let Some(expected) = expect else { return Ok(()) };
    if grid.kind_at(origin.0, origin.1) == Some(expected.as_str()) {
        Ok(())
    } else {
        Err(EffectFault::OriginGone {
            x: origin.0,
            y: origin.1,
            expected: expected.clone(),
        })
    }
}

/// Offsets along one axis within `radius` of `origin` that stay inside
/// `[0, extent)`.
pub(crate) fn span(origin: i32, extent: u32, radius: u32) -> RangeInclusive<i64> {
    let (o, r) = (origin as i64, radius as i64);
    (-r).max(-o)..=r.min(extent as i64 - 1 - o)
}

/// Euclidean length of an offset.
pub(crate) fn distance(dx: i64, dy: i64) -> f32 {
    ((dx * dx + dy * dy) as f64).sqrt() as f32
}

pub fn apply_effect(
    grid: &mut Grid,
    registry: &ElementRegistry,
    effects: &mut EffectQueue,
    rng: &mut SimRng,
    effect: &DeferredEffect,
) -> Result<(), EffectFault> {
    let (x, y) = effect.origin;
    if !grid.in_bounds(x, y) {
        return Err(EffectFault::OutOfBounds { x, y });
    }
    match &effect.kind {
        EffectKind::Explosion(spec) => {
            expect_at(grid, effect.origin, &spec.expect)?;
            let plan = compute_blast(grid, registry, effect.origin, spec, rng);
            log::debug!(
                "explosion at ({}, {}) r={} destroys {} cells",
                x,
                y,
                spec.radius,
                plan.destroyed().len()
            );
            apply_blast(grid, registry, effects, rng, &plan)?;
        }
        EffectKind::Spawn { element } => {
            if grid.is_empty(x, y) {
                let particle = registry.instantiate(element, &ParticleOverrides::none(), rng)?;
                grid.set(x, y, Some(particle));
            }
        }
        EffectKind::Clear { expect } => {
            expect_at(grid, effect.origin, expect)?;
            grid.set(x, y, None);
        }
        EffectKind::Heat { amount, radius } => {
            let rf = *radius as f32;
            let falloff = rf + 1.0;
            for dy in span(y, grid.height(), *radius) {
                for dx in span(x, grid.width(), *radius) {
                    let d = distance(dx, dy);
                    if d > rf {
                        continue;
                    }
                    let (cx, cy) = ((x as i64 + dx) as i32, (y as i64 + dy) as i32);
                    if let Some(p) = grid.get_mut(cx, cy) {
                        p.temperature += amount * (1.0 - d / falloff);
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::error::StepFault;
    use crate::domain::content::ContentBundle;
    use crate::domain::element::{ElementBehavior, ElementDefaults};
    use crate::domain::particle::{Particle, Phase};
    use crate::systems::behaviors::StaticBehavior;
    use crate::systems::primitives::explosion::ExplosionSpec;
    use crate::systems::StepContext;

    struct Brittle;

    impl ElementBehavior for Brittle {
        fn on_create(&self, _p: &mut Particle, _d: &ElementDefaults, _rng: &mut SimRng) {
            panic!("cracked on creation");
        }

        fn step(&self, _ctx: &mut StepContext<'_>) -> Result<(), StepFault> {
            Ok(())
        }
    }

    fn registry() -> ElementRegistry {
        ContentBundle::builtin().unwrap().into_registry().unwrap()
    }

    #[test]
    fn failing_effect_does_not_stop_the_flush() {
        let reg = registry();
        let mut g = Grid::new(5, 5);
        let mut q = EffectQueue::new();
        let mut rng = SimRng::seeded(4);
        q.schedule(EffectKind::Spawn { element: "sand".into() }, (9, 9), 0);
        q.schedule(
            EffectKind::Clear { expect: Some("dynamite".into()) },
            (1, 1),
            0,
        );
        q.schedule(EffectKind::Spawn { element: "plasma".into() }, (2, 2), 0);
        q.schedule(EffectKind::Spawn { element: "sand".into() }, (3, 3), 0);

        let report = flush(&mut g, &reg, &mut q, &mut rng, usize::MAX);
        assert_eq!(report, FlushReport { applied: 1, skipped: 3 });
        assert_eq!(g.kind_at(3, 3), Some("sand"));
        assert!(q.is_empty());
    }

    #[test]
    fn spawn_only_fills_empty_cells() {
        let reg = registry();
        let mut g = Grid::new(3, 3);
        g.place(1, 1, Particle::new("stone")).unwrap();
        let mut q = EffectQueue::new();
        q.schedule(EffectKind::Spawn { element: "water".into() }, (1, 1), 0);
        flush(&mut g, &reg, &mut q, &mut SimRng::seeded(0), usize::MAX);
        assert_eq!(g.kind_at(1, 1), Some("stone"));
    }

    #[test]
    fn explosion_skipped_when_origin_changed() {
        let reg = registry();
        let mut g = Grid::new(9, 9);
        g.place(4, 4, Particle::new("sand")).unwrap();
        let mut q = EffectQueue::new();
        q.schedule(
            EffectKind::Explosion(ExplosionSpec {
                radius: 3,
                power: 1.0,
                expect: Some("dynamite".into()),
            }),
            (4, 4),
            0,
        );
        let report = flush(&mut g, &reg, &mut q, &mut SimRng::seeded(0), usize::MAX);
        assert_eq!(report.skipped, 1);
        assert_eq!(g.kind_at(4, 4), Some("sand"));
    }

    #[test]
    fn heat_fades_with_distance() {
        let reg = registry();
        let mut g = Grid::new(5, 1);
        for x in 0..5 {
            g.place(x, 0, Particle::new("stone")).unwrap();
        }
        let mut q = EffectQueue::new();
        q.schedule(EffectKind::Heat { amount: 100.0, radius: 2 }, (0, 0), 0);
        flush(&mut g, &reg, &mut q, &mut SimRng::seeded(0), usize::MAX);
        let t: Vec<f32> = (0..5).map(|x| g.get(x, 0).unwrap().temperature).collect();
        assert!(t[0] > t[1] && t[1] > t[2]);
        assert_eq!(t[3], 25.0);
        assert_eq!(t[4], 25.0);
    }

    #[test]
    fn oversized_heat_radius_is_clipped_to_the_grid() {
        let reg = registry();
        let mut g = Grid::new(3, 3);
        g.place(1, 1, Particle::new("stone")).unwrap();
        g.place(2, 2, Particle::new("stone")).unwrap();
        let mut q = EffectQueue::new();
        q.schedule(EffectKind::Heat { amount: 10.0, radius: 50_000 }, (1, 1), 0);
        q.schedule(EffectKind::Spawn { element: "stone".into() }, (0, 0), 0);

        let report = flush(&mut g, &reg, &mut q, &mut SimRng::seeded(0), usize::MAX);
        assert_eq!(report, FlushReport { applied: 2, skipped: 0 });
        assert_eq!(g.kind_at(0, 0), Some("stone"));
        assert!((g.get(1, 1).unwrap().temperature - 35.0).abs() < 1e-3);
        assert!(g.get(2, 2).unwrap().temperature > 34.9);
    }

    #[test]
    fn panicking_effect_is_skipped() {
        let mut reg = ElementRegistry::new();
        reg.register(ElementDefaults::new("brittle", Phase::Solid), Arc::new(Brittle))
            .unwrap();
        reg.register(ElementDefaults::new("stone", Phase::Solid), Arc::new(StaticBehavior))
            .unwrap();
        let mut g = Grid::new(3, 3);
        let mut q = EffectQueue::new();
        q.schedule(EffectKind::Spawn { element: "brittle".into() }, (0, 0), 0);
        q.schedule(EffectKind::Spawn { element: "stone".into() }, (1, 0), 0);

        let report = flush(&mut g, &reg, &mut q, &mut SimRng::seeded(0), usize::MAX);
        assert_eq!(report, FlushReport { applied: 1, skipped: 1 });
        assert!(g.is_empty(0, 0));
        assert_eq!(g.kind_at(1, 0), Some("stone"));
        assert!(q.is_empty());
    }

    #[test]
    fn span_clips_to_the_grid() {
        assert_eq!(span(1, 3, 50_000), -1..=1);
        assert_eq!(span(0, 10, 2), 0..=2);
        assert_eq!(span(9, 10, u32::MAX), -9..=0);
        assert!(span(-20, 10, 5).is_empty());
        assert_eq!(distance(i32::MAX as i64, 0), i32::MAX as f32);
    }
}
