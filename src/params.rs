//! Construction parameters for a [`crate::detector::Detector`].

use crate::constants::{
    GRAVES_DEFAULT_NARROW_CUTOFF_HZ, GRAVES_DEFAULT_THRESHOLD, GRAVES_DEFAULT_WIDE_CUTOFF_HZ,
    GRAVES_MIN_CHIRP_DURATION_S, MIN_NORMALIZED_CUTOFF,
};
use crate::error::DetectorError;

/// Immutable construction parameters for a detector.
///
/// All fields are validated once, at construction time, by [`DetectorParams::new`].
/// `Detector` never re-validates them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectorParams {
    /// Sample rate of the incoming baseband stream, in Hz. Must be positive.
    pub sample_rate: f32,
    /// Tuning offset of the transmitter within the baseband, in Hz. `|offset| < sample_rate / 2`.
    pub tuning_offset: f32,
    /// Wide filter cutoff `Fc1`, in Hz.
    pub wide_cutoff: f32,
    /// Narrow filter cutoff `Fc2`, in Hz. Must be strictly less than `wide_cutoff`.
    pub narrow_cutoff: f32,
    /// Detection threshold `tau` (dimensionless). Reference default is `2.0`.
    pub threshold: f32,
    /// Minimum chirp duration `T_min`, in seconds. Reference default is `0.07`.
    pub min_chirp_duration: f32,
}

impl DetectorParams {
    /// Validate and construct a parameter set.
    ///
    /// Returns [`DetectorError::InvalidParameter`] if `wide_cutoff <= narrow_cutoff`,
    /// if either cutoff normalized to the sample rate falls below the hard safety
    /// floor (see [`MIN_NORMALIZED_CUTOFF`]), or if any other invariant of
    /// the detector's data model is violated.
    pub fn new(
        sample_rate: f32,
        tuning_offset: f32,
        wide_cutoff: f32,
        narrow_cutoff: f32,
        threshold: f32,
        min_chirp_duration: f32,
    ) -> Result<Self, DetectorError> {
        if !(sample_rate > 0.0) {
            return Err(DetectorError::InvalidParameter(format!(
                "sample_rate must be positive, got {sample_rate}"
            )));
        }
        if tuning_offset.abs() >= sample_rate / 2.0 {
            return Err(DetectorError::InvalidParameter(format!(
                "tuning_offset {tuning_offset} Hz must satisfy |offset| < sample_rate/2 ({} Hz)",
                sample_rate / 2.0
            )));
        }
        if !(threshold > 0.0) {
            return Err(DetectorError::InvalidParameter(format!(
                "threshold must be positive, got {threshold}"
            )));
        }
        if !(min_chirp_duration > 0.0) {
            return Err(DetectorError::InvalidParameter(format!(
                "min_chirp_duration must be positive, got {min_chirp_duration}"
            )));
        }
        if !(wide_cutoff > narrow_cutoff) {
            return Err(DetectorError::InvalidParameter(format!(
                "wide cutoff ({wide_cutoff} Hz) must exceed narrow cutoff ({narrow_cutoff} Hz)"
            )));
        }

        let safe_min_hz = MIN_NORMALIZED_CUTOFF * sample_rate;
        if narrow_cutoff / sample_rate < MIN_NORMALIZED_CUTOFF {
            return Err(DetectorError::InvalidParameter(format!(
                "narrow cutoff ({narrow_cutoff} Hz) is below the safety floor at this sample \
                 rate; the smallest safe cutoff here is {safe_min_hz:.3} Hz (need sample_rate <= \
                 {:.1} Hz for a {narrow_cutoff} Hz cutoff)",
                narrow_cutoff / MIN_NORMALIZED_CUTOFF
            )));
        }
        if wide_cutoff / sample_rate < MIN_NORMALIZED_CUTOFF {
            return Err(DetectorError::InvalidParameter(format!(
                "wide cutoff ({wide_cutoff} Hz) is below the safety floor at this sample rate; \
                 the smallest safe cutoff here is {safe_min_hz:.3} Hz",
            )));
        }

        Ok(Self {
            sample_rate,
            tuning_offset,
            wide_cutoff,
            narrow_cutoff,
            threshold,
            min_chirp_duration,
        })
    }

    /// Reproduces the reference GRAVES detector's default profile at the given
    /// sample rate: `Fc1 = 300 Hz`, `Fc2 = 50 Hz`, `tau = 2.0`, `T_min = 0.07 s`,
    /// tuned to baseband center (`tuning_offset = 0`).
    pub fn graves_defaults(sample_rate: f32) -> Result<Self, DetectorError> {
        Self::new(
            sample_rate,
            0.0,
            GRAVES_DEFAULT_WIDE_CUTOFF_HZ,
            GRAVES_DEFAULT_NARROW_CUTOFF_HZ,
            GRAVES_DEFAULT_THRESHOLD,
            GRAVES_MIN_CHIRP_DURATION_S,
        )
    }

    /// Band ratio `R = Fc2 / Fc1`, the expected value of `Q` under flat in-band noise.
    pub fn band_ratio(&self) -> f32 {
        self.narrow_cutoff / self.wide_cutoff
    }

    /// Ring/look-back window length `H = ceil(Fs * T_min)`, in samples.
    pub fn window_len(&self) -> usize {
        (self.sample_rate * self.min_chirp_duration).ceil() as usize
    }

    /// Single-pole smoothing coefficient `alpha = 1 - exp(-1 / (Fs * T_min))`.
    pub fn smoothing_alpha(&self) -> f32 {
        1.0 - (-1.0 / (self.sample_rate * self.min_chirp_duration)).exp()
    }

    /// Detection energy threshold `E_th = tau * R * H`.
    pub fn energy_threshold(&self) -> f32 {
        self.threshold * self.band_ratio() * self.window_len() as f32
    }
}
