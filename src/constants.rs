//! Numerical constants shared by the detector and by consumer-side post-processing.

/// Speed of light in m/s, used only by Doppler post-processing (`summary::doppler_series`).
pub const SPEED_OF_LIGHT_M_S: f32 = 2.998e8;

/// Nominal transmitter frequency of the GRAVES radar, in Hz.
pub const GRAVES_DEFAULT_FREQ_HZ: f64 = 143_050_000.0;

/// Reference minimum chirp duration, in seconds, used by the reference profile.
pub const GRAVES_MIN_CHIRP_DURATION_S: f32 = 0.07;

/// Reference detection threshold (dimensionless, "times above noise floor").
pub const GRAVES_DEFAULT_THRESHOLD: f32 = 2.0;

/// Reference wide-filter cutoff, in Hz.
pub const GRAVES_DEFAULT_WIDE_CUTOFF_HZ: f32 = 300.0;

/// Reference narrow-filter cutoff, in Hz.
pub const GRAVES_DEFAULT_NARROW_CUTOFF_HZ: f32 = 50.0;

/// Hard safety floor for a normalized cutoff frequency (cutoff / sample_rate).
///
/// Below this, the cutoff's poles cluster too close to DC for single-precision
/// bilinear-transform coefficients to resolve accurately. A cutoff of 50 Hz is
/// only safe when `sample_rate <= 50.0 / MIN_NORMALIZED_CUTOFF` (about 312
/// kHz), matching the reference implementation's safety floor.
pub const MIN_NORMALIZED_CUTOFF: f32 = 0.00016;

/// Per-sample SNR ceiling applied by [`crate::record::q_to_snr`] as `q` approaches 1.
pub const SNR_CEILING: f32 = 100.0;
