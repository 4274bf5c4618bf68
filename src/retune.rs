//! Lock-free single-word cell for a deferred center-frequency change.

use std::sync::atomic::{AtomicU64, Ordering};

const DIRTY_BIT: u64 = 1 << 32;

/// A cross-thread "pending retune" cell: any producer may call [`PendingRetune::set`]
/// to schedule a new center frequency; the owning detector thread calls
/// [`PendingRetune::take`] at the top of each feed batch to apply it exactly once.
///
/// Packs the pending `f32` (as its bit pattern) and a dirty flag into a single
/// `AtomicU64` so the update is a single lock-free word exchange.
#[derive(Debug, Default)]
pub struct PendingRetune {
    word: AtomicU64,
}

impl PendingRetune {
    /// Create an empty cell (no pending retune).
    pub fn new() -> Self {
        Self {
            word: AtomicU64::new(0),
        }
    }

    /// Schedule `fc` (Hz) to be applied at the next [`PendingRetune::take`].
    /// May be called from any thread.
    pub fn set(&self, fc: f32) {
        let packed = (fc.to_bits() as u64) | DIRTY_BIT;
        self.word.store(packed, Ordering::Release);
    }

    /// Atomically take and clear the pending value, if any. Intended to be
    /// called only by the detector's single producer thread.
    pub fn take(&self) -> Option<f32> {
        let packed = self.word.swap(0, Ordering::Acquire);
        if packed & DIRTY_BIT != 0 {
            Some(f32::from_bits((packed & 0xFFFF_FFFF) as u32))
        } else {
            None
        }
    }
}
