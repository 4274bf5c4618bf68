//! Fixed-size circular look-back buffers.

use num_complex::Complex32;

/// Fixed-size ring buffers holding the last `H` processed samples, `Q` values
/// and narrow-band noise-power estimates, where `H` is the detector's
/// look-back window. After `H` writes the ring is full and the write cursor
/// points at the oldest slot.
///
/// The windowed sum of `q_hist` (the detection energy `E`) is maintained
/// incrementally rather than recomputed in full each feed: each write
/// subtracts the value it overwrites and adds the new one, which is
/// mathematically equivalent to spec's `E = sum(q_hist)` but O(1) instead of
/// O(H) per sample.
#[derive(Debug, Clone)]
pub struct RingHistory {
    samples: Vec<Complex32>,
    q_hist: Vec<f32>,
    p_n_hist: Vec<f32>,
    /// Write cursor: after a write, points at the oldest slot.
    cursor: usize,
    /// Running sum of `q_hist`, i.e. the current detection energy `E`.
    energy: f32,
}

impl RingHistory {
    /// Create a ring of length `len` (the look-back window `H`), zero-initialized.
    pub fn new(len: usize) -> Self {
        Self {
            samples: vec![Complex32::default(); len],
            q_hist: vec![0.0; len],
            p_n_hist: vec![0.0; len],
            cursor: 0,
            energy: 0.0,
        }
    }

    /// Look-back window length `H`.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Current detection energy: the windowed sum of `q_hist` over all `H` entries.
    pub fn energy(&self) -> f32 {
        self.energy
    }

    /// Write one `(sample, q, p_n)` triple at the cursor and advance it modulo `H`.
    /// After this call the cursor points at the oldest remaining slot.
    #[inline]
    pub fn push(&mut self, sample: Complex32, q: f32, p_n: f32) {
        let i = self.cursor;
        self.energy += q - self.q_hist[i];
        self.samples[i] = sample;
        self.q_hist[i] = q;
        self.p_n_hist[i] = p_n;
        self.cursor += 1;
        if self.cursor == self.samples.len() {
            self.cursor = 0;
        }
    }

    /// Iterate the ring's contents oldest-first: `(sample, q, p_n)`.
    pub fn iter_oldest_first(&self) -> impl Iterator<Item = (Complex32, f32, f32)> + '_ {
        let len = self.samples.len();
        (0..len).map(move |i| {
            let idx = (self.cursor + i) % len;
            (self.samples[idx], self.q_hist[idx], self.p_n_hist[idx])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_points_at_oldest_after_full_cycle() {
        let mut ring = RingHistory::new(4);
        for i in 0..4 {
            ring.push(Complex32::new(i as f32, 0.0), i as f32, 0.0);
        }
        // Cursor wrapped back to 0, the slot that was written first and is now
        // the oldest of the next cycle's perspective... but within this cycle,
        // all 4 slots are filled and cursor == 0 means slot 0 will be
        // overwritten next, i.e. slot 0 is the oldest entry.
        let oldest: Vec<_> = ring.iter_oldest_first().map(|(s, _, _)| s.re).collect();
        assert_eq!(oldest, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn energy_tracks_running_sum_of_q() {
        let mut ring = RingHistory::new(3);
        ring.push(Complex32::default(), 0.2, 0.0);
        ring.push(Complex32::default(), 0.3, 0.0);
        ring.push(Complex32::default(), 0.5, 0.0);
        assert!((ring.energy() - 1.0).abs() < 1e-6);
        // Overwrite the oldest (0.2) with 0.1: energy should drop by 0.1.
        ring.push(Complex32::default(), 0.1, 0.0);
        assert!((ring.energy() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn oldest_first_after_wraparound() {
        let mut ring = RingHistory::new(3);
        for i in 0..5 {
            ring.push(Complex32::new(i as f32, 0.0), 0.0, 0.0);
        }
        // Values 0,1,2,3,4 pushed into a length-3 ring: remaining are 2,3,4
        // with 2 the oldest.
        let oldest: Vec<_> = ring.iter_oldest_first().map(|(s, _, _)| s.re).collect();
        assert_eq!(oldest, vec![2.0, 3.0, 4.0]);
    }
}
