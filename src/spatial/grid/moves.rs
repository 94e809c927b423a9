use super::*;

impl Grid {
    /// Move the particle at `(x1, y1)` into the empty cell `(x2, y2)`.
    /// Returns false (and changes nothing) when the source is empty, the
    /// destination is occupied, or either is out of bounds.
    pub fn move_particle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        let (Some(from), Some(to)) = (self.index(x1, y1), self.index(x2, y2)) else {
            return false;
        };
        if from == to || self.cells[from].is_none() || self.cells[to].is_some() {
            return false;
        }
        self.cells.swap(from, to);
        true
    }

    // === Swap two cells (either may be empty) ===
    pub fn swap(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        let (Some(a), Some(b)) = (self.index(x1, y1), self.index(x2, y2)) else {
            return false;
        };
        self.cells.swap(a, b);
        true
    }
}
