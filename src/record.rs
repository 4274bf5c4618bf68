//! The chirp descriptor emitted by the detector, and its derived per-sample series.

use num_complex::Complex32;

use crate::constants::SNR_CEILING;

/// A self-contained descriptor of one detected chirp.
///
/// Owns all of its buffers; the sink may move or copy them freely. `samples`,
/// `q`, `p_n`, `snr` and `noise_floor` are parallel sequences of length `L`,
/// in the order the underlying samples entered the detector.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChirpRecord {
    /// Integer whole seconds since detector start, of the chirp's closing edge.
    pub t0: u64,
    /// Fractional-second remainder of the closing edge, in `[0, 1)`.
    pub t0f: f32,
    /// Sample rate the detector was constructed with, in Hz.
    pub fs: f32,
    /// Band ratio `R = Fc2/Fc1`, copied from the detector.
    pub ratio: f32,
    /// Demodulated (narrow-filtered) complex samples.
    pub samples: Vec<Complex32>,
    /// Per-sample `Q` statistic.
    pub q: Vec<f32>,
    /// Per-sample narrow-band smoothed noise power.
    pub p_n: Vec<f32>,
    /// Per-sample signal-to-noise ratio, derived from `q` and `ratio`.
    pub snr: Vec<f32>,
    /// Per-sample noise-floor estimate, normalized to the narrow channel.
    pub noise_floor: Vec<f32>,
}

impl ChirpRecord {
    /// Number of samples `L` in the record.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration of the record in seconds (`L / fs`).
    pub fn duration_secs(&self) -> f32 {
        self.len() as f32 / self.fs
    }

    /// Wall-clock offset of the record's leading edge, in seconds from detector start.
    pub fn start_secs(&self) -> f64 {
        self.t0 as f64 + self.t0f as f64
    }
}

/// Converts the `Q` statistic to a per-sample signal-to-noise ratio.
///
/// `q <= R`: no signal above the noise floor, returns `0`. `q` approaching
/// `1`: returns the ceiling (see [`SNR_CEILING`]) rather than diverging.
pub fn q_to_snr(ratio: f32, q: f32) -> f32 {
    if q <= ratio {
        0.0
    } else if q >= 1.0 {
        SNR_CEILING
    } else {
        let snr = (q - ratio) / (ratio * (1.0 - q));
        snr.clamp(0.0, SNR_CEILING)
    }
}

/// Estimates the in-band noise power alone, from the narrow-band smoothed
/// power `p_n` and the per-sample SNR, normalized by the band ratio `R`.
/// Returns `0` if `ratio <= 0` (ill-defined band ratio).
pub fn noise_power(ratio: f32, p_n: f32, snr: f32) -> f32 {
    if ratio > 0.0 {
        p_n / (1.0 + snr) * (1.0 / ratio)
    } else {
        0.0
    }
}

/// Noise-floor estimate normalized to the narrow channel: `R * N0(R, p_n, snr)`.
pub fn noise_floor(ratio: f32, p_n: f32, snr: f32) -> f32 {
    ratio * noise_power(ratio, p_n, snr)
}
