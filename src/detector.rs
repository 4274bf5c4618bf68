//! The streaming echo detector: a sample-driven state machine over a tuned,
//! dual-filtered complex baseband stream.

use std::sync::Arc;

use num_complex::Complex32;

use crate::capture::CaptureBuffers;
use crate::error::DetectorError;
use crate::filter::ButterworthLowpass4;
use crate::oscillator::Oscillator;
use crate::params::DetectorParams;
use crate::power::PowerTracker;
use crate::record::{q_to_snr, noise_floor, ChirpRecord};
use crate::retune::PendingRetune;
use crate::ring::RingHistory;
use crate::sink::ChirpSink;

/// A thread-safe, cheaply cloned handle that schedules a center-frequency
/// change on a [`Detector`] from any thread, without requiring access to the
/// detector itself. Obtain one via [`Detector::retune_handle`].
#[derive(Clone)]
pub struct RetuneHandle(Arc<PendingRetune>);

impl RetuneHandle {
    /// Schedule `fc` (Hz) to be applied at the start of the owning detector's
    /// next `feed`/`feed_batch` call.
    pub fn set_center_freq_later(&self, fc: f32) {
        self.0.set(fc);
    }
}

/// The streaming chirp detector. Single producer: `feed`/`feed_batch` require
/// exclusive access, while `set_center_freq_later` (and a cloned
/// [`RetuneHandle`]) may be called from any thread via a lock-free atomic cell.
pub struct Detector<S: ChirpSink> {
    params: DetectorParams,
    oscillator: Oscillator,
    wide_filter: ButterworthLowpass4,
    narrow_filter: ButterworthLowpass4,
    power_wide: PowerTracker,
    power_narrow: PowerTracker,
    ring: RingHistory,
    capture: CaptureBuffers,
    in_chirp: bool,
    n: u64,
    last_good_q: f32,
    ratio: f32,
    energy_threshold: f32,
    pending_retune: Arc<PendingRetune>,
    sink: S,
}

impl<S: ChirpSink> Detector<S> {
    /// Construct a detector. Validates nothing beyond what [`DetectorParams::new`]
    /// already validated; allocates the look-back ring (length `H`) and
    /// initializes both filters with zero state.
    pub fn new(params: DetectorParams, sink: S) -> Result<Self, DetectorError> {
        let window_len = params.window_len();
        if window_len == 0 {
            return Err(DetectorError::InvalidParameter(
                "min_chirp_duration is too small for this sample rate: window length rounds to 0"
                    .to_string(),
            ));
        }

        Ok(Self {
            oscillator: Oscillator::new(params.sample_rate, params.tuning_offset),
            wide_filter: ButterworthLowpass4::new(params.sample_rate, params.wide_cutoff),
            narrow_filter: ButterworthLowpass4::new(params.sample_rate, params.narrow_cutoff),
            power_wide: PowerTracker::new(params.smoothing_alpha()),
            power_narrow: PowerTracker::new(params.smoothing_alpha()),
            ring: RingHistory::new(window_len),
            capture: CaptureBuffers::new(),
            in_chirp: false,
            n: 0,
            last_good_q: 1.0,
            ratio: params.band_ratio(),
            energy_threshold: params.energy_threshold(),
            pending_retune: Arc::new(PendingRetune::new()),
            sink,
            params,
        })
    }

    /// Read-only access to the parameters this detector was constructed with.
    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    /// Band ratio `R = Fc2/Fc1`.
    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    /// Whether the detector currently believes it is inside a chirp.
    pub fn in_chirp(&self) -> bool {
        self.in_chirp
    }

    /// Total samples fed so far.
    pub fn samples_fed(&self) -> u64 {
        self.n
    }

    /// Borrow the sink. Useful for sinks that accumulate results in-place
    /// (a `Vec`-backed collector, a counter) rather than forwarding them
    /// elsewhere.
    pub fn sink_ref(&self) -> &S {
        &self.sink
    }

    /// Mutably borrow the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Schedule `fc` (Hz) to be applied at the start of the next `feed`/`feed_batch` call.
    /// May be called from any producer.
    pub fn set_center_freq_later(&self, fc: f32) {
        self.pending_retune.set(fc);
    }

    /// Obtain a cheaply cloned, thread-safe handle equivalent to
    /// [`Detector::set_center_freq_later`], for hosts that want to hand
    /// retuning off to a separate control thread.
    pub fn retune_handle(&self) -> RetuneHandle {
        RetuneHandle(Arc::clone(&self.pending_retune))
    }

    fn apply_pending_retune(&mut self) {
        if let Some(fc) = self.pending_retune.take() {
            self.oscillator.set_center_freq(self.params.sample_rate, fc);
            log::debug!("applied pending retune to {fc} Hz");
        }
    }

    /// Consume one sample. Applies any pending retune first.
    pub fn feed(&mut self, sample: Complex32) -> Result<(), DetectorError> {
        self.apply_pending_retune();
        self.feed_one(sample)
    }

    /// Consume a batch of samples. Equivalent to repeated [`Detector::feed`],
    /// except any pending retune is applied exactly once, at the head of the
    /// batch, rather than being re-checked per sample.
    pub fn feed_batch(&mut self, samples: &[Complex32]) -> Result<(), DetectorError> {
        self.apply_pending_retune();
        for &sample in samples {
            self.feed_one(sample)?;
        }
        Ok(())
    }

    fn feed_one(&mut self, sample: Complex32) -> Result<(), DetectorError> {
        let tuned = sample * self.oscillator.step();

        let y_w = self.wide_filter.tick(tuned);
        let p_w = self.power_wide.update(y_w);

        let y_n = self.narrow_filter.tick(tuned);
        let p_n = self.power_narrow.update(y_n);

        let raw_q = p_n / p_w;
        // `p_w == 0.0` happens not just at stream start but for as long as
        // the input stays exactly zero (silence never perturbs either power
        // smoother away from 0.0), so `raw_q` is `0.0/0.0 = NaN` on every
        // such feed, not just the first. Mapping NaN to `last_good_q` would
        // pin `q` at its initial `1.0` forever and let the ring's energy
        // climb past threshold on pure silence; map it to `0.0` (no signal
        // observed yet) instead. A finite out-of-range value (`raw_q >= 1.0`,
        // which can happen transiently once real power has accumulated) is
        // still substituted with `last_good_q` as before.
        let q = if raw_q.is_nan() {
            0.0
        } else if raw_q >= 1.0 {
            self.last_good_q
        } else {
            self.last_good_q = raw_q;
            raw_q
        };

        self.ring.push(y_n, q, p_n);
        let energy = self.ring.energy();

        let result = if self.in_chirp {
            if energy < self.energy_threshold {
                self.close_chirp()
            } else {
                match self.capture.push(y_n, q, p_n) {
                    Ok(()) => Ok(()),
                    Err(e) => {
                        self.abort_chirp();
                        Err(e)
                    }
                }
            }
        } else if energy >= self.energy_threshold {
            self.open_chirp()
        } else {
            Ok(())
        };

        self.n += 1;
        result
    }

    fn open_chirp(&mut self) -> Result<(), DetectorError> {
        match self.capture.seed_from_ring(self.ring.iter_oldest_first()) {
            Ok(()) => {
                self.in_chirp = true;
                log::trace!("chirp opened at sample {}", self.n);
                Ok(())
            }
            Err(e) => {
                self.capture.reset();
                Err(e)
            }
        }
    }

    fn abort_chirp(&mut self) {
        self.in_chirp = false;
        self.capture.reset();
    }

    fn close_chirp(&mut self) -> Result<(), DetectorError> {
        self.in_chirp = false;

        let n_close = self.n;
        let (samples, q, p_n) = self.capture.clone_out();
        let len = samples.len() as u64;
        self.capture.reset();

        let total_samples_elapsed = n_close.saturating_sub(len);
        let total_seconds = total_samples_elapsed as f64 / self.params.sample_rate as f64;
        let t0 = total_seconds.floor() as u64;
        let t0f = (total_seconds - t0 as f64) as f32;

        let snr: Vec<f32> = q.iter().map(|&qi| q_to_snr(self.ratio, qi)).collect();
        let floor: Vec<f32> = p_n
            .iter()
            .zip(snr.iter())
            .map(|(&p, &s)| noise_floor(self.ratio, p, s))
            .collect();

        let record = ChirpRecord {
            t0,
            t0f,
            fs: self.params.sample_rate,
            ratio: self.ratio,
            samples,
            q,
            p_n,
            snr,
            noise_floor: floor,
        };

        log::debug!(
            "chirp closed: {} samples, start {}+{}s",
            record.len(),
            record.t0,
            record.t0f
        );

        if self.sink.on_chirp(record) {
            Ok(())
        } else {
            Err(DetectorError::SinkFailed)
        }
    }
}
