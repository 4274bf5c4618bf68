//! Error types returned by detector construction and feeding.

use thiserror::Error;

/// Errors surfaced by [`crate::detector::Detector`].
///
/// No error is fatal to an already-constructed detector: construction either
/// succeeds fully or fails fully (no partial detector is returned), and every
/// runtime error leaves the detector in a consistent `IDLE` state from which
/// feeding can continue.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectorError {
    /// Construction-time parameter validation failed. Unrecoverable without
    /// supplying new parameters.
    #[error("invalid detector parameter: {0}")]
    InvalidParameter(String),

    /// A growable-buffer append failed during an active chirp. The current
    /// chirp is discarded and the detector returns to `IDLE` with its
    /// growable buffers truncated; feeding may continue.
    #[error("allocation failed while capturing a chirp")]
    AllocationFailed,

    /// The sink's `on_chirp` callback returned `false`. The detector returns
    /// to `IDLE`; the dropped chirp is not re-emitted.
    #[error("chirp sink rejected the emitted record")]
    SinkFailed,
}
