//! Grid - fixed-size 2-D array of optional particles
//!
//! The only state container of the engine. Each cell holds at most one
//! `Particle`; a particle value lives in exactly one cell, and every
//! operation here moves values (never clones) so references cannot alias.
//! Out-of-bounds coordinates make every operation a no-op.

use crate::domain::particle::Particle;

mod indexing;
mod accessors;
mod moves;

pub struct Grid {
    width: u32,
    height: u32,
    size: usize,
    cells: Vec<Option<Particle>>,
    occupied: usize,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        let mut cells = Vec::with_capacity(size);
        cells.resize_with(size, || None);
        Self {
            width,
            height,
            size,
            cells,
            occupied: 0,
        }
    }

    /// Number of occupied cells.
    #[inline]
    pub fn particle_count(&self) -> usize {
        self.occupied
    }

    /// Iterate occupied cells in row-major order (renderer read path).
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &Particle)> + '_ {
        let w = self.width;
        self.cells.iter().enumerate().filter_map(move |(idx, c)| {
            c.as_ref().map(|p| ((idx as u32) % w, (idx as u32) / w, p))
        })
    }

    /// Element name per cell, row-major; `None` for empty cells.
    pub fn kinds(&self) -> Vec<Option<&str>> {
        self.cells.iter().map(|c| c.as_ref().map(|p| p.kind.as_str())).collect()
    }

    /// Remove every particle.
    pub fn clear(&mut self) {
        for c in self.cells.iter_mut() {
            *c = None;
        }
        self.occupied = 0;
    }
}
