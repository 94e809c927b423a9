//! One tick: reset -> scan -> deferred flush. The grid is stable when
//! `tick` returns.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::core::error::panic_message;
use crate::core::timer::TickTimer;
use crate::systems::effects::flush;
use crate::systems::StepContext;

use super::{ScanOrder, Simulation, TickStats};

pub(super) fn tick(sim: &mut Simulation) {
    let timer = TickTimer::start();
    let mut stats = TickStats { frame: sim.frame, ..TickStats::default() };

    // === Reset ===
    // Particles created during the previous tick stay processed until here
    sim.grid.reset_processed();
    sim.effects.set_frame(sim.frame);

    // === Scan ===
    let w = sim.grid.width() as i32;
    let h = sim.grid.height() as i32;
    let reverse_x = sim.settings.alternate_rows && sim.frame & 1 == 1;
    for row in 0..h {
        let y = match sim.settings.scan_order {
            ScanOrder::TopDown => row,
            ScanOrder::BottomUp => h - 1 - row,
        };
        for col in 0..w {
            let x = if reverse_x { w - 1 - col } else { col };
            visit(sim, x, y, &mut stats);
        }
    }

    // === Deferred flush ===
    let report = flush(
        &mut sim.grid,
        &sim.registry,
        &mut sim.effects,
        &mut sim.rng,
        sim.settings.max_effects_per_flush,
    );
    stats.effects_applied = report.applied;
    stats.effects_skipped = report.skipped;
    stats.effects_pending = sim.effects.len() as u32;
    stats.particle_count = sim.grid.particle_count() as u32;

    // === Stable ===
    sim.frame += 1;
    stats.tick_ms = timer.elapsed_ms();
    sim.stats = stats;
}

/// Dispatch one cell. The processed flag is set before `step` runs, so a
/// particle is stepped at most once per tick wherever it ends up.
fn visit(sim: &mut Simulation, x: i32, y: i32, stats: &mut TickStats) {
    let entry = {
        let Some(p) = sim.grid.get_mut(x, y) else { return };
        if p.processed {
            return;
        }
        p.processed = true;
        match sim.registry.lookup(&p.kind) {
            Ok(entry) => entry,
            Err(_) => {
                if sim.reported_unknown.insert(p.kind.clone()) {
                    log::warn!("unregistered element `{}` at ({}, {}) left inert", p.kind, x, y);
                }
                stats.unknown_skipped += 1;
                return;
            }
        }
    };

    let mut ctx = StepContext {
        grid: &mut sim.grid,
        registry: &sim.registry,
        effects: &mut sim.effects,
        rng: &mut sim.rng,
        settings: &sim.settings,
        x,
        y,
        frame: sim.frame,
    };
    stats.particles_processed += 1;

    let outcome = catch_unwind(AssertUnwindSafe(|| entry.behavior().step(&mut ctx)));
    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(fault)) => {
            stats.step_faults += 1;
            log::error!("`{}` at ({}, {}) failed: {}", entry.defaults.name, x, y, fault);
        }
        Err(panic) => {
            stats.step_faults += 1;
            log::error!(
                "`{}` at ({}, {}) panicked: {}",
                entry.defaults.name,
                x,
                y,
                panic_message(&*panic)
            );
        }
    }
}
