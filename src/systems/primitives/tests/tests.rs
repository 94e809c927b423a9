use super::chance::{is_burning, light, BURN_LEFT, DEFAULT_BURN_TICKS};
use super::electric::{charge_of, CHARGE, JOULE_HEAT};
use super::*;
use crate::core::error::StepFault;
use crate::core::rng::SimRng;
use crate::domain::content::ContentBundle;
use crate::domain::particle::ParticleOverrides;
use crate::domain::registry::ElementRegistry;
use crate::simulation::SimSettings;
use crate::spatial::Grid;
use crate::systems::effects::{EffectKind, EffectQueue};

/// Owns everything a `StepContext` borrows.
struct Bench {
    grid: Grid,
    registry: ElementRegistry,
    effects: EffectQueue,
    rng: SimRng,
    settings: SimSettings,
}

impl Bench {
    fn new(width: u32, height: u32) -> Self {
        Self {
            grid: Grid::new(width, height),
            registry: ContentBundle::builtin().unwrap().into_registry().unwrap(),
            effects: EffectQueue::new(),
            rng: SimRng::seeded(11),
            settings: SimSettings::default(),
        }
    }

    fn put(&mut self, x: i32, y: i32, kind: &str) {
        self.put_with(x, y, kind, &ParticleOverrides::none());
    }

    fn put_hot(&mut self, x: i32, y: i32, kind: &str, temperature: f32) {
        self.put_with(x, y, kind, &ParticleOverrides::with_temperature(temperature));
    }

    fn put_with(&mut self, x: i32, y: i32, kind: &str, overrides: &ParticleOverrides) {
        let mut p = self.registry.instantiate(kind, overrides, &mut self.rng).unwrap();
        p.processed = false;
        self.grid.set(x, y, Some(p));
    }

    fn ctx(&mut self, x: i32, y: i32) -> StepContext<'_> {
        StepContext {
            grid: &mut self.grid,
            registry: &self.registry,
            effects: &mut self.effects,
            rng: &mut self.rng,
            settings: &self.settings,
            x,
            y,
            frame: 0,
        }
    }

    fn kind(&self, x: i32, y: i32) -> Option<&str> {
        self.grid.kind_at(x, y)
    }

    fn temp(&self, x: i32, y: i32) -> f32 {
        self.grid.get(x, y).map(|p| p.temperature).unwrap()
    }
}

// === transform ===

#[test]
fn transform_to_empty_clears() {
    let mut b = Bench::new(2, 2);
    b.put(0, 0, "sand");
    transform(&mut b.ctx(0, 0), 0, 0, "empty", Heat::Reset).unwrap();
    assert!(b.grid.is_empty(0, 0));
    // Out of bounds is a no-op
    transform(&mut b.ctx(0, 0), 5, 5, "sand", Heat::Reset).unwrap();
    assert_eq!(b.grid.particle_count(), 0);
}

#[test]
fn transform_heat_modes() {
    let mut b = Bench::new(2, 1);
    b.put_hot(0, 0, "water", 150.0);
    b.put_hot(1, 0, "water", 150.0);
    transform(&mut b.ctx(0, 0), 0, 0, "steam", Heat::Keep).unwrap();
    transform(&mut b.ctx(1, 0), 1, 0, "steam", Heat::Reset).unwrap();
    assert_eq!(b.temp(0, 0), 150.0);
    assert_eq!(b.temp(1, 0), 110.0);
    assert!(b.grid.get(0, 0).unwrap().processed);
}

#[test]
fn transform_into_unknown_kind_faults() {
    let mut b = Bench::new(1, 1);
    b.put(0, 0, "sand");
    let err = transform_self(&mut b.ctx(0, 0), "plasma", Heat::Reset).unwrap_err();
    assert!(matches!(err, StepFault::Config(_)));
    assert_eq!(b.kind(0, 0), Some("sand"));
}

#[test]
fn spawn_never_overwrites() {
    let mut b = Bench::new(2, 1);
    b.put(0, 0, "stone");
    assert!(!spawn(&mut b.ctx(0, 0), 0, 0, "sand").unwrap());
    assert!(spawn(&mut b.ctx(0, 0), 1, 0, "sand").unwrap());
    assert!(!spawn(&mut b.ctx(0, 0), 2, 0, "sand").unwrap());
    assert_eq!(b.kind(0, 0), Some("stone"));
    assert_eq!(b.kind(1, 0), Some("sand"));
}

// === movement ===

#[test]
fn density_swap_rules() {
    let mut b = Bench::new(3, 2);
    b.put(0, 0, "sand");
    b.put(0, 1, "water");
    b.put(1, 0, "sand");
    b.put(1, 1, "sand");
    b.put(2, 0, "sand");
    b.put(2, 1, "stone");

    let mut ctx = b.ctx(0, 0);
    assert!(try_density_swap(&mut ctx, 0, 1));
    assert_eq!(ctx.pos(), (0, 1));
    assert!(!try_density_swap(&mut b.ctx(1, 0), 1, 1));
    assert!(!try_density_swap(&mut b.ctx(2, 0), 2, 1));
    assert!(!try_density_swap(&mut b.ctx(1, 0), 2, 0));

    assert_eq!(b.kind(0, 0), Some("water"));
    assert_eq!(b.kind(0, 1), Some("sand"));
    assert!(b.grid.is_processed(0, 0) && b.grid.is_processed(0, 1));
}

#[test]
fn fall_goes_straight_then_diagonal() {
    let mut b = Bench::new(3, 3);
    b.put(1, 0, "sand");
    assert!(fall(&mut b.ctx(1, 0)));
    assert_eq!(b.kind(1, 1), Some("sand"));

    b.put(1, 2, "stone");
    assert!(fall(&mut b.ctx(1, 1)));
    assert!(b.kind(0, 2) == Some("sand") || b.kind(2, 2) == Some("sand"));

    let mut b = Bench::new(1, 1);
    b.put(0, 0, "sand");
    assert!(!fall(&mut b.ctx(0, 0)));
}

#[test]
fn flow_pours_over_the_nearest_edge() {
    let mut b = Bench::new(7, 2);
    for x in [0, 1, 2, 3, 4, 6] {
        b.put(x, 1, "stone");
    }
    b.put(3, 0, "water");
    assert!(flow(&mut b.ctx(3, 0), 4, 1.0));
    assert_eq!(b.kind(5, 0), Some("water"));
}

#[test]
fn flow_without_room_stays() {
    let mut b = Bench::new(3, 2);
    for x in 0..3 {
        b.put(x, 1, "stone");
    }
    b.put(0, 0, "stone");
    b.put(2, 0, "stone");
    b.put(1, 0, "water");
    assert!(!flow(&mut b.ctx(1, 0), 4, 1.0));
    assert_eq!(b.kind(1, 0), Some("water"));
}

fn floored(width: u32) -> Bench {
    let mut b = Bench::new(width, 2);
    for x in 0..width as i32 {
        b.put(x, 1, "stone");
    }
    b
}

#[test]
fn flow_spreads_no_further_than_reach() {
    let mut b = floored(9);
    b.put(4, 0, "water");
    assert!(flow(&mut b.ctx(4, 0), 2, 1.0));
    let landed: Vec<i32> = (0..9).filter(|x| b.kind(*x, 0) == Some("water")).collect();
    assert!(landed == vec![2] || landed == vec![6], "landed at {landed:?}");
}

#[test]
fn flow_stops_at_foreign_particles() {
    let mut b = floored(7);
    b.put(2, 0, "sand");
    b.put(4, 0, "oil");
    b.put(3, 0, "water");
    assert!(!flow(&mut b.ctx(3, 0), 4, 1.0));
    assert_eq!(b.kind(3, 0), Some("water"));
    assert!(b.grid.is_empty(1, 0) && b.grid.is_empty(5, 0));
}

#[test]
fn flow_passes_only_unprocessed_liquid_of_its_kind() {
    let mut b = floored(7);
    b.put(2, 0, "water");
    b.put(4, 0, "water");
    b.grid.set_processed(2, 0, true);
    b.grid.set_processed(4, 0, true);
    b.put(3, 0, "water");
    assert!(!flow(&mut b.ctx(3, 0), 4, 1.0));
    assert_eq!(b.grid.particle_count(), 10);
    assert!(b.grid.is_empty(0, 0) && b.grid.is_empty(6, 0));

    let mut b = floored(7);
    b.put(2, 0, "water");
    b.put(4, 0, "stone");
    b.put(3, 0, "water");
    assert!(flow(&mut b.ctx(3, 0), 4, 1.0));
    assert_eq!(b.kind(0, 0), Some("water"));
    assert!(b.grid.is_empty(3, 0));
}

#[test]
fn gas_rises() {
    let mut b = Bench::new(1, 3);
    b.put(0, 2, "steam");
    assert!(rise(&mut b.ctx(0, 2)));
    assert_eq!(b.kind(0, 1), Some("steam"));
}

// === heat ===

#[test]
fn diffusion_conserves_heat() {
    let mut b = Bench::new(2, 1);
    b.put_hot(0, 0, "metal", 400.0);
    b.put_hot(1, 0, "metal", 0.0);
    diffuse_heat(&mut b.ctx(0, 0)).unwrap();
    let (hot, cold) = (b.temp(0, 0), b.temp(1, 0));
    assert!((hot + cold - 400.0).abs() < 1e-3);
    assert!(hot < 400.0 && cold > 0.0 && hot > cold);
}

#[test]
fn zero_exchange_scale_freezes_heat() {
    let mut b = Bench::new(2, 1);
    b.put_hot(0, 0, "metal", 400.0);
    b.put(1, 0, "metal");
    b.settings.heat_exchange_scale = 0.0;
    diffuse_heat(&mut b.ctx(0, 0)).unwrap();
    assert_eq!(b.temp(0, 0), 400.0);
    assert_eq!(b.temp(1, 0), 25.0);
}

#[test]
fn ambient_exchange_relaxes() {
    let mut b = Bench::new(1, 1);
    b.put(0, 0, "steam");
    exchange_ambient(&mut b.ctx(0, 0)).unwrap();
    assert!((b.temp(0, 0) - 109.15).abs() < 1e-3);
}

#[test]
fn phase_change_keeps_heat() {
    let mut b = Bench::new(1, 1);
    b.put_hot(0, 0, "water", 120.0);
    assert!(apply_phase_change(&mut b.ctx(0, 0)).unwrap());
    assert_eq!(b.kind(0, 0), Some("steam"));
    assert_eq!(b.temp(0, 0), 120.0);

    b.put(0, 0, "water");
    assert!(!apply_phase_change(&mut b.ctx(0, 0)).unwrap());
}

// === chance ===

#[test]
fn reaction_replaces_both() {
    let mut b = Bench::new(2, 1);
    b.put(0, 0, "water");
    b.put(1, 0, "lava");
    assert!(react(&mut b.ctx(0, 0)).unwrap());
    assert_eq!(b.kind(0, 0), Some("steam"));
    assert_eq!(b.kind(1, 0), Some("stone"));
}

#[test]
fn no_partner_no_reaction() {
    let mut b = Bench::new(2, 1);
    b.put(0, 0, "water");
    b.put(1, 0, "sand");
    assert!(!react(&mut b.ctx(0, 0)).unwrap());
}

#[test]
fn reaction_chance_gates_the_swap() {
    let mut b = Bench::new(2, 1);
    b.registry = ContentBundle::from_json(
        r#"{"elements":[
            {"name":"rust","reactions":[{"with":"damp","becomes":"dust","chance":0.0}]},
            {"name":"tinder","reactions":[{"with":"damp","becomes":"dust","chance":1.0}]},
            {"name":"damp"},
            {"name":"dust"}
        ]}"#,
    )
    .unwrap()
    .into_registry()
    .unwrap();
    b.put(0, 0, "rust");
    b.put(1, 0, "damp");
    assert!(!(0..200).any(|_| react(&mut b.ctx(0, 0)).unwrap()));
    assert_eq!(b.kind(0, 0), Some("rust"));

    b.put(0, 0, "tinder");
    assert!(react(&mut b.ctx(0, 0)).unwrap());
    assert_eq!(b.kind(0, 0), Some("dust"));
    assert_eq!(b.kind(1, 0), Some("damp"));
}

#[test]
fn corrosion_respects_resistance() {
    let mut b = Bench::new(2, 1);
    b.put(0, 0, "acid");
    b.put(1, 0, "steel");
    for _ in 0..100 {
        assert!(!corrode(&mut b.ctx(0, 0), 1, 0, 1.0).unwrap());
    }
    b.put(1, 0, "stone");
    let mut dissolved = false;
    for _ in 0..100 {
        if corrode(&mut b.ctx(0, 0), 1, 0, 1.0).unwrap() {
            dissolved = true;
            break;
        }
    }
    assert!(dissolved);
    assert!(b.grid.is_empty(1, 0));
}

#[test]
fn lighting_a_fuel() {
    let mut b = Bench::new(2, 1);
    b.put(0, 0, "wood");
    b.put(1, 0, "stone");
    let wood = b.registry.defaults("wood").unwrap().clone();
    let p = b.grid.get_mut(0, 0).unwrap();
    assert!(light(p, &wood));
    assert!(is_burning(p));
    assert_eq!(p.extras.int(BURN_LEFT), Some(60));
    assert!(p.temperature >= 280.0);
    assert!(!light(p, &wood));

    assert!(!ignite(&mut b.ctx(0, 0), 1, 0));
}

#[test]
fn hot_fuel_catches_fire_eventually() {
    let mut b = Bench::new(1, 1);
    b.put_hot(0, 0, "wood", 300.0);
    let lit = (0..500).any(|_| catch_fire(&mut b.ctx(0, 0)).unwrap());
    assert!(lit);
    assert!(is_burning(b.grid.get(0, 0).unwrap()));

    let mut b = Bench::new(1, 1);
    b.put(0, 0, "wood");
    assert!(!(0..500).any(|_| catch_fire(&mut b.ctx(0, 0)).unwrap()));
}

#[test]
fn per_instance_flammability_overrides_the_element() {
    let mut b = Bench::new(2, 1);
    let damp = ParticleOverrides { flammable: Some(false), ..ParticleOverrides::with_temperature(500.0) };
    b.put_with(0, 0, "wood", &damp);
    let wood = b.registry.defaults("wood").unwrap().clone();
    assert!(!light(b.grid.get_mut(0, 0).unwrap(), &wood));
    assert!(!(0..200).any(|_| catch_fire(&mut b.ctx(0, 0)).unwrap()));

    let oily = ParticleOverrides { flammable: Some(true), ..ParticleOverrides::none() };
    b.put_with(1, 0, "stone", &oily);
    let stone = b.registry.defaults("stone").unwrap().clone();
    let p = b.grid.get_mut(1, 0).unwrap();
    assert!(light(p, &stone));
    assert_eq!(p.extras.int(BURN_LEFT), Some(DEFAULT_BURN_TICKS as i64));
    assert!(p.temperature >= 300.0);
}

#[test]
fn probability_edges() {
    let mut b = Bench::new(1, 1);
    b.put(0, 0, "sand");
    let mut ctx = b.ctx(0, 0);
    assert!(!with_probability(&mut ctx, 0.0, |_| panic!("never")).unwrap());
    assert!(with_probability(&mut ctx, 1.0, |_| Ok(())).unwrap());
    let err = with_probability(&mut ctx, 1.0, |_| Err(StepFault::Rule("no".into()))).unwrap_err();
    assert_eq!(err, StepFault::Rule("no".into()));
}

// === explosions ===

#[test]
fn detonate_only_queues() {
    let mut b = Bench::new(5, 5);
    b.put(2, 2, "dynamite");
    detonate(&mut b.ctx(2, 2), 5).unwrap();
    assert_eq!(b.kind(2, 2), Some("dynamite"));
    let queued = b.effects.iter().next().unwrap();
    assert_eq!(queued.due, 5);
    assert_eq!(queued.origin, (2, 2));
    match &queued.kind {
        EffectKind::Explosion(spec) => {
            assert_eq!(spec.radius, 10);
            assert_eq!(spec.expect.as_deref(), Some("dynamite"));
        }
        other => panic!("unexpected {:?}", other),
    }

    b.put(0, 0, "sand");
    assert!(matches!(detonate(&mut b.ctx(0, 0), 0), Err(StepFault::Rule(_))));
    assert_eq!(b.effects.len(), 1);
}

// === charge ===

#[test]
fn charge_steps_down_from_the_strongest_neighbour() {
    let mut b = Bench::new(4, 1);
    b.put(0, 0, "battery");
    b.put(1, 0, "wire");
    b.put(2, 0, "wire");
    b.put(3, 0, "stone");
    assert_eq!(charge_of(b.grid.get(0, 0).unwrap()), 10);

    assert!(conduct(&mut b.ctx(1, 0)).unwrap());
    assert!(conduct(&mut b.ctx(2, 0)).unwrap());
    assert_eq!(charge_of(b.grid.get(1, 0).unwrap()), 9);
    assert_eq!(charge_of(b.grid.get(2, 0).unwrap()), 8);
    assert!((b.temp(1, 0) - (25.0 + JOULE_HEAT)).abs() < 1e-5);

    assert!(!conduct(&mut b.ctx(3, 0)).unwrap());
    assert_eq!(charge_of(b.grid.get(3, 0).unwrap()), 0);
    assert_eq!(b.temp(3, 0), 25.0);
}

#[test]
fn insulated_instance_blocks_charge() {
    let mut b = Bench::new(2, 1);
    b.put(0, 0, "battery");
    let insulated = ParticleOverrides { conductive: Some(false), ..ParticleOverrides::none() };
    b.put_with(1, 0, "wire", &insulated);
    assert!(!conduct(&mut b.ctx(1, 0)).unwrap());
    assert!(!b.grid.get(1, 0).unwrap().extras.contains(CHARGE));
    assert_eq!(b.temp(1, 0), 25.0);
}

#[test]
fn charge_drains_without_a_source() {
    let mut b = Bench::new(1, 1);
    let mut stale = ParticleOverrides::none();
    stale.extras.set_int(CHARGE, 5);
    b.put_with(0, 0, "wire", &stale);
    assert!(!conduct(&mut b.ctx(0, 0)).unwrap());
    assert_eq!(charge_of(b.grid.get(0, 0).unwrap()), 0);
}
