//! Growable capture buffers appended to during an active chirp.

use num_complex::Complex32;

use crate::error::DetectorError;

/// Three parallel growable sequences captured while a chirp is active:
/// demodulated samples, `Q` statistic, and narrow-band noise-power estimate.
///
/// `reset` clears length but retains capacity, so peak allocation across the
/// detector's lifetime settles at the longest chirp ever seen plus the
/// look-back window `H`.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffers {
    samples: Vec<Complex32>,
    q: Vec<f32>,
    p_n: Vec<f32>,
}

impl CaptureBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of samples currently captured.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Clear captured data but keep the underlying capacity.
    pub fn reset(&mut self) {
        self.samples.clear();
        self.q.clear();
        self.p_n.clear();
    }

    /// Append one `(sample, q, p_n)` triple. Fails with
    /// [`DetectorError::AllocationFailed`] if growing any of the three
    /// sequences would exceed available memory; on failure the buffers are
    /// left exactly as they were (truncated to their pre-call state).
    pub fn push(&mut self, sample: Complex32, q: f32, p_n: f32) -> Result<(), DetectorError> {
        self.samples
            .try_reserve(1)
            .map_err(|_| DetectorError::AllocationFailed)?;
        self.q
            .try_reserve(1)
            .map_err(|_| DetectorError::AllocationFailed)?;
        self.p_n
            .try_reserve(1)
            .map_err(|_| DetectorError::AllocationFailed)?;
        self.samples.push(sample);
        self.q.push(q);
        self.p_n.push(p_n);
        Ok(())
    }

    /// Seed the capture buffers from the look-back ring, oldest-first,
    /// discarding any previous content. Same fallibility as [`push`](Self::push).
    pub fn seed_from_ring<I>(&mut self, entries: I) -> Result<(), DetectorError>
    where
        I: Iterator<Item = (Complex32, f32, f32)>,
    {
        self.reset();
        for (sample, q, p_n) in entries {
            self.push(sample, q, p_n)?;
        }
        Ok(())
    }

    pub fn samples(&self) -> &[Complex32] {
        &self.samples
    }

    pub fn q(&self) -> &[f32] {
        &self.q
    }

    pub fn p_n(&self) -> &[f32] {
        &self.p_n
    }

    /// Clone out the buffers' current contents without clearing them. Pair
    /// with [`CaptureBuffers::reset`] to hand a chirp's data to an emitted
    /// record while retaining the buffers' allocated capacity for the next
    /// chirp.
    pub fn clone_out(&self) -> (Vec<Complex32>, Vec<f32>, Vec<f32>) {
        (self.samples.clone(), self.q.clone(), self.p_n.clone())
    }
}
