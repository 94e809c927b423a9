use super::super::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

impl Grid {
    // === Processed flag ===
    #[inline]
    pub fn is_processed(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map_or(false, |p| p.processed)
    }

    #[inline]
    pub fn set_processed(&mut self, x: i32, y: i32, processed: bool) {
        if let Some(p) = self.get_mut(x, y) {
            p.processed = processed;
        }
    }

    /// Clear the processed flag on every particle (start of a tick).
    #[inline]
    pub fn reset_processed(&mut self) {
        #[cfg(feature = "parallel")]
        {
            self.cells.par_iter_mut().for_each(|c| {
                if let Some(p) = c {
                    p.processed = false;
                }
            });
        }
        #[cfg(not(feature = "parallel"))]
        {
            for p in self.cells.iter_mut().flatten() {
                p.processed = false;
            }
        }
    }
}
