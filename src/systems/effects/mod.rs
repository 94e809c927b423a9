//! Deferred effects: grid mutations that apply during the flush phase at
//! the end of a tick instead of in the middle of the scan.

pub mod apply;
pub mod queue;

pub use apply::{apply_effect, flush, FlushReport};
pub use queue::{DeferredEffect, EffectKind, EffectQueue};
