//! Convenience re-exports of the crate's public surface.

pub use crate::capture::CaptureBuffers;
pub use crate::constants::*;
pub use crate::detector::{Detector, RetuneHandle};
pub use crate::error::DetectorError;
pub use crate::params::DetectorParams;
pub use crate::record::{noise_floor, noise_power, q_to_snr, ChirpRecord};
pub use crate::sink::ChirpSink;
pub use crate::summary::{doppler_series, summarize, to_named_arrays, ChirpSummary, RecordArrays};
pub use num_complex::Complex32;
