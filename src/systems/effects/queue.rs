use crate::systems::primitives::explosion::ExplosionSpec;

/// What a deferred effect does when it fires.
#[derive(Clone, Debug, PartialEq)]
pub enum EffectKind {
    Explosion(ExplosionSpec),
    /// Instantiate `element` at the origin if the cell is still empty
    Spawn { element: String },
    /// Empty the origin, optionally only if it still holds `expect`
    Clear { expect: Option<String> },
    /// Add heat around the origin, fading linearly with distance
    Heat { amount: f32, radius: u32 },
}

impl EffectKind {
    pub fn label(&self) -> &'static str {
        match self {
            EffectKind::Explosion(_) => "explosion",
            EffectKind::Spawn { .. } => "spawn",
            EffectKind::Clear { .. } => "clear",
            EffectKind::Heat { .. } => "heat",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeferredEffect {
    pub kind: EffectKind,
    pub origin: (i32, i32),
    /// Frame whose flush applies this effect
    pub due: u64,
    seq: u64,
}

impl DeferredEffect {
    #[inline]
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Tick-counted effect queue. An effect scheduled with delay `d` while the
/// queue is at frame `T` is released by the flush of frame `T + d`; effects
/// released together keep their enqueue order.
#[derive(Debug, Default)]
pub struct EffectQueue {
    pending: Vec<DeferredEffect>,
    now: u64,
    next_seq: u64,
}

impl EffectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame that the next `schedule` call counts delays from.
    #[inline]
    pub fn now(&self) -> u64 {
        self.now
    }

    pub(crate) fn set_frame(&mut self, frame: u64) {
        self.now = frame;
    }

    pub fn schedule(&mut self, kind: EffectKind, origin: (i32, i32), delay: u32) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(DeferredEffect {
            kind,
            origin,
            due: self.now + delay as u64,
            seq,
        });
        seq
    }

    /// Remove and return up to `limit` effects due at or before the current
    /// frame, oldest first. The rest stay queued in order.
    pub fn take_due(&mut self, limit: usize) -> Vec<DeferredEffect> {
        let now = self.now;
        let mut due = Vec::new();
        let mut kept = Vec::with_capacity(self.pending.len());
        for effect in self.pending.drain(..) {
            if effect.due <= now && due.len() < limit {
                due.push(effect);
            } else {
                kept.push(effect);
            }
        }
        self.pending = kept;
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeferredEffect> {
        self.pending.iter()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
