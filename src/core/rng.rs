//! Single seeded random source shared by every rule in a simulation.
//!
//! All probabilistic decisions (coin flips in movement, ignition, corrosion,
//! blast rolls) draw from one `SimRng`, so a run replays exactly from its seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Clone, Debug)]
pub struct SimRng {
    inner: ChaCha8Rng,
}

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Fair coin.
    #[inline]
    pub fn coin(&mut self) -> bool {
        self.inner.gen::<bool>()
    }

    /// `true` with probability `p`. Values outside [0,1] saturate and do not
    /// consume randomness.
    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        if p.is_nan() || p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.inner.gen::<f32>() < p
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }

    /// Uniform integer in `[lo, hi]`; returns `lo` when the range is empty.
    #[inline]
    pub fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        self.inner.gen_range(lo..=hi)
    }

    /// Random horizontal direction pair `(first, second)`, e.g. `(-1, 1)`.
    #[inline]
    pub fn sides(&mut self) -> (i32, i32) {
        if self.coin() { (-1, 1) } else { (1, -1) }
    }
}
