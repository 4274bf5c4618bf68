//! The detector's emission callback capability.

use crate::record::ChirpRecord;

/// Receives completed chirp records. A single-method trait in place of a
/// C-style function pointer plus opaque user pointer.
///
/// Implement this directly for a zero-overhead monomorphized sink (no dynamic
/// dispatch on the hot path), or use a `Box<dyn ChirpSink>` when a
/// cross-thread or heterogeneous sink is needed.
pub trait ChirpSink {
    /// Called once per emitted chirp, inline on the producer's thread, in the
    /// order closing edges occur in the sample stream. Return `false` to
    /// signal failure: the current `feed` call will return
    /// [`crate::error::DetectorError::SinkFailed`] and the chirp is dropped
    /// (not re-emitted), but the detector's own state remains consistent.
    ///
    /// Must not block the producer for longer than one sample interval at the
    /// target rate.
    fn on_chirp(&mut self, record: ChirpRecord) -> bool;
}

/// Blanket impl so any `FnMut(ChirpRecord) -> bool` closure is a valid sink.
impl<F: FnMut(ChirpRecord) -> bool> ChirpSink for F {
    fn on_chirp(&mut self, record: ChirpRecord) -> bool {
        self(record)
    }
}
