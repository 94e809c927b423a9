use super::*;

impl Grid {
    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn size(&self) -> usize { self.size }

    // === Bounds checking ===
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    // === Index conversion ===
    /// Flat index for in-bounds coordinates, `None` otherwise.
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some((y as usize) * (self.width as usize) + x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (i32, i32) {
        let x = (idx as u32) % self.width;
        let y = (idx as u32) / self.width;
        (x as i32, y as i32)
    }
}
