use std::sync::Arc;

use elementa_engine::{ContentBundle, EffectKind, SimSettings, Simulation};

fn scene(seed: u64) -> Simulation {
    #[cfg(not(target_arch = "wasm32"))]
    let _ = env_logger::builder().is_test(true).try_init();

    let registry = ContentBundle::builtin().unwrap().into_registry().unwrap();
    let mut sim =
        Simulation::with_settings(48, 32, SimSettings::default().with_seed(seed), Arc::new(registry))
            .unwrap();
    sim.add_particles_in_radius(10, 5, 4, "sand").unwrap();
    sim.add_particles_in_radius(24, 6, 4, "water").unwrap();
    sim.add_particles_in_radius(36, 8, 3, "oil").unwrap();
    sim.add_particles_in_radius(30, 28, 3, "lava").unwrap();
    sim.add_particles_in_radius(16, 26, 3, "wood").unwrap();
    sim.add_particles_in_radius(20, 20, 2, "gunpowder").unwrap();
    sim.add_particle(17, 22, "ember").unwrap();
    sim.add_particle(40, 0, "faucet").unwrap();
    sim.add_particle(5, 31, "torch").unwrap();
    sim
}

fn snapshot(sim: &Simulation) -> Vec<(u32, u32, String, u32)> {
    sim.grid()
        .iter()
        .map(|(x, y, p)| (x, y, p.kind.clone(), p.temperature.to_bits()))
        .collect()
}

#[test]
fn same_seed_same_world() {
    let mut a = scene(42);
    let mut b = scene(42);
    for _ in 0..200 {
        a.tick();
        b.tick();
    }
    assert_eq!(a.frame(), 200);
    assert_eq!(snapshot(&a), snapshot(&b));
}

#[test]
fn same_seed_same_world_after_explosion() {
    let mut a = scene(7);
    let mut b = scene(7);
    for sim in [&mut a, &mut b] {
        sim.schedule_effect(
            EffectKind::Explosion(elementa_engine::systems::primitives::ExplosionSpec {
                radius: 6,
                power: 1.0,
                expect: None,
            }),
            (24, 10),
            5,
        );
    }
    for _ in 0..60 {
        a.tick();
        b.tick();
    }
    assert_eq!(snapshot(&a), snapshot(&b));
    assert_eq!(a.stats().effects_skipped(), b.stats().effects_skipped());
}
