use super::super::*;

impl Grid {
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<&Particle> {
        self.index(x, y).and_then(|idx| self.cells[idx].as_ref())
    }

    #[inline]
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Particle> {
        let idx = self.index(x, y)?;
        self.cells[idx].as_mut()
    }

    /// In bounds and unoccupied. Out-of-bounds cells are never "empty".
    #[inline]
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(idx) => self.cells[idx].is_none(),
            None => false,
        }
    }

    /// Kind name at a cell, if occupied.
    #[inline]
    pub fn kind_at(&self, x: i32, y: i32) -> Option<&str> {
        self.get(x, y).map(|p| p.kind.as_str())
    }

    // === Set cell (overwrite) ===
    pub fn set(&mut self, x: i32, y: i32, value: Option<Particle>) {
        let Some(idx) = self.index(x, y) else { return };
        let was = self.cells[idx].is_some();
        let now = value.is_some();
        self.cells[idx] = value;
        self.track(was, now);
    }

    /// Put a particle into an empty cell. Hands the particle back when the
    /// cell is occupied or out of bounds.
    pub fn place(&mut self, x: i32, y: i32, particle: Particle) -> Result<(), Particle> {
        match self.index(x, y) {
            Some(idx) if self.cells[idx].is_none() => {
                self.cells[idx] = Some(particle);
                self.occupied += 1;
                Ok(())
            }
            _ => Err(particle),
        }
    }

    /// Overwrite a cell, returning whatever was there.
    pub fn replace(&mut self, x: i32, y: i32, particle: Particle) -> Option<Particle> {
        let idx = self.index(x, y)?;
        let old = self.cells[idx].replace(particle);
        if old.is_none() {
            self.occupied += 1;
        }
        old
    }

    pub fn take(&mut self, x: i32, y: i32) -> Option<Particle> {
        let idx = self.index(x, y)?;
        let old = self.cells[idx].take();
        if old.is_some() {
            self.occupied -= 1;
        }
        old
    }

    #[inline]
    fn track(&mut self, was: bool, now: bool) {
        match (was, now) {
            (false, true) => self.occupied += 1,
            (true, false) => self.occupied -= 1,
            _ => {}
        }
    }
}
