//! Liquid flow: fall, slide, then scan sideways up to `reach` cells.
//!
//! The sideways scan walks through unprocessed particles of the same kind,
//! remembers the furthest empty cell, and stops early at a cliff (an empty
//! cell with an empty cell below it) so liquid pours over edges.

use super::density::try_enter;
use super::StepContext;

/// Result of scanning a horizontal line
struct ScanResult {
    found: bool,
    x: i32,
    has_cliff: bool,
}

fn scan_line(ctx: &StepContext<'_>, kind: &str, dir: i32, reach: u32) -> ScanResult {
    let (x, y) = ctx.pos();
    let mut result = ScanResult { found: false, x, has_cliff: false };

    for i in 1..=reach as i32 {
        let tx = x + dir * i;
        if !ctx.grid.in_bounds(tx, y) {
            break;
        }
        match ctx.grid.get(tx, y) {
            None => {
                result.found = true;
                result.x = tx;
                if ctx.grid.is_empty(tx, y + 1) {
                    result.has_cliff = true;
                    break;
                }
            }
            // Pass through our own body of liquid
            Some(p) if p.kind == kind && !p.processed => continue,
            Some(_) => break,
        }
    }
    result
}

/// Returns whether the particle moved. `flow_chance` gates only the
/// sideways spread, so viscous liquids still fall freely.
pub fn flow(ctx: &mut StepContext<'_>, reach: u32, flow_chance: f32) -> bool {
    let (x, y) = ctx.pos();
    if try_enter(ctx, x, y + 1) {
        return true;
    }
    let (first, second) = ctx.rng.sides();
    if ctx.is_empty(x + first, y + 1) && ctx.move_to(x + first, y + 1) {
        return true;
    }
    if ctx.is_empty(x + second, y + 1) && ctx.move_to(x + second, y + 1) {
        return true;
    }
    if reach == 0 || !ctx.rng.chance(flow_chance) {
        return false;
    }

    let kind = match ctx.grid.get(x, y) {
        Some(p) => p.kind.clone(),
        None => return false,
    };
    let a = scan_line(ctx, &kind, first, reach);
    let b = scan_line(ctx, &kind, second, reach);

    // Prefer a side that pours over an edge; otherwise the first side
    let target = match (a.found, b.found) {
        (true, true) if b.has_cliff && !a.has_cliff => b.x,
        (true, _) => a.x,
        (false, true) => b.x,
        (false, false) => return false,
    };
    ctx.move_to(target, y)
}
