//! Consumer-side post-processing: Doppler series and summary aggregation.
//!
//! None of this is part of the detector's own contract; it is supplied here
//! as small pure functions over a [`ChirpRecord`], mirroring the reference
//! implementation's `EchoDetector::Chirp::process()`
//! (`examples/original_source/src/ChirpModel.cpp` and
//! `include/EchoDetector.h`), which derives exactly these three scalars
//! (mean SNR, mean Doppler, duration) from the raw per-sample series.

use crate::constants::SPEED_OF_LIGHT_M_S;
use crate::record::ChirpRecord;

/// Three scalar summaries derived from a chirp's raw per-sample series,
/// mirroring the reference tool's `Chirp::process()` output fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChirpSummary {
    /// Arithmetic mean of the per-sample SNR series.
    pub mean_snr: f32,
    /// SNR-weighted mean of the per-sample Doppler series, in m/s.
    pub mean_doppler: f32,
    /// `L / fs`, in seconds.
    pub duration_secs: f32,
}

/// Instantaneous radial velocity (m/s) at each sample of `record`, given the
/// transmitter's nominal carrier frequency. Index `0` is always `0.0` (there
/// is no prior sample to form a phase difference against); this keeps the
/// series the same length `L` as the record's other parallel arrays, matching
/// the named-array layout in [`to_named_arrays`].
///
/// Computed from the phase difference between consecutive demodulated
/// samples: `v = (c / (2*f0)) * (dphi/dt) / (2*pi)`, with the factor of 2
/// accounting for the two-way (bistatic, approximated monostatic) path.
pub fn doppler_series(record: &ChirpRecord, transmitter_freq_hz: f64) -> Vec<f32> {
    let mut out = vec![0.0f32; record.len()];
    if record.len() < 2 {
        return out;
    }
    let dt = 1.0 / record.fs as f64;
    let scale = (SPEED_OF_LIGHT_M_S as f64 / (2.0 * transmitter_freq_hz))
        / (std::f64::consts::TAU * dt);
    for i in 1..record.samples.len() {
        let dphi = (record.samples[i] * record.samples[i - 1].conj()).arg() as f64;
        out[i] = (scale * dphi) as f32;
    }
    out
}

/// Summarize a record into mean SNR, SNR-weighted mean Doppler, and duration.
///
/// The leading placeholder sample (index `0`, which has no Doppler estimate)
/// is excluded from the weighted mean; if the record has fewer than two
/// samples, `mean_doppler` is `0.0`.
pub fn summarize(record: &ChirpRecord, transmitter_freq_hz: f64) -> ChirpSummary {
    let mean_snr = if record.snr.is_empty() {
        0.0
    } else {
        record.snr.iter().sum::<f32>() / record.snr.len() as f32
    };

    let doppler = doppler_series(record, transmitter_freq_hz);
    let mut weighted_sum = 0.0f64;
    let mut weight_total = 0.0f64;
    for i in 1..doppler.len() {
        let w = record.snr[i].max(0.0) as f64;
        weighted_sum += w * doppler[i] as f64;
        weight_total += w;
    }
    let mean_doppler = if weight_total > 0.0 {
        (weighted_sum / weight_total) as f32
    } else {
        0.0
    };

    ChirpSummary {
        mean_snr,
        mean_doppler,
        duration_secs: record.duration_secs(),
    }
}

/// A flat, named-array layout for serializing a record. Plain data; this
/// crate does not itself pick a text/binary format.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordArrays {
    pub t0: u64,
    pub t0f: f32,
    pub fs: f32,
    pub rbw: f32,
    pub x_re: Vec<f32>,
    pub x_im: Vec<f32>,
    pub q: Vec<f32>,
    pub p_n: Vec<f32>,
    pub snr: Vec<f32>,
    pub doppler: Vec<f32>,
}

/// Flatten a record into the named-array layout, computing the Doppler series
/// at the given transmitter frequency.
pub fn to_named_arrays(record: &ChirpRecord, transmitter_freq_hz: f64) -> RecordArrays {
    RecordArrays {
        t0: record.t0,
        t0f: record.t0f,
        fs: record.fs,
        rbw: record.ratio,
        x_re: record.samples.iter().map(|s| s.re).collect(),
        x_im: record.samples.iter().map(|s| s.im).collect(),
        q: record.q.clone(),
        p_n: record.p_n.clone(),
        snr: record.snr.clone(),
        doppler: doppler_series(record, transmitter_freq_hz),
    }
}
