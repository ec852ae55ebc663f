// Autocorrelation module - FFT-based linear autocorrelation
//
// Computes the non-circular autocorrelation of a frame for lags 0..N-1 via the
// Wiener-Khinchin theorem: zero-pad to at least 2N-1 points, take the power
// spectrum, and inverse-transform. The result is normalized by the lag-0
// value (the frame's sum of squares).

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Autocorrelation processor with FFT plans sized for one frame length
///
/// Plans are immutable and shared, so one processor can serve any number of
/// frames (and threads) without locking.
pub struct Autocorrelator {
    frame_length: usize,
    fft_size: usize,
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
}

impl Autocorrelator {
    /// Create a processor for frames of `frame_length` samples
    pub fn new(frame_length: usize) -> Self {
        // Linear (not circular) correlation needs at least 2N-1 points
        let fft_size = (2 * frame_length).saturating_sub(1).max(1).next_power_of_two();

        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(fft_size);
        let inverse = planner.plan_fft_inverse(fft_size);

        Self {
            frame_length,
            fft_size,
            forward,
            inverse,
        }
    }

    /// Frame length the FFT plans were sized for
    pub fn frame_length(&self) -> usize {
        self.frame_length
    }

    /// Compute normalized autocorrelation for lags 0..frame.len()
    ///
    /// Frames of a different length than the planned one are handled with a
    /// one-off plan.
    ///
    /// # Returns
    /// Vector of `frame.len()` values with `r[0] == 1.0` and every other value
    /// in [-1, 1]; all zeros when the frame has no energy
    pub fn compute(&self, frame: &[f32]) -> Vec<f32> {
        if frame.len() != self.frame_length {
            log::debug!(
                "[Autocorrelator] Replanning for frame of {} samples (planned {})",
                frame.len(),
                self.frame_length
            );
            return Autocorrelator::new(frame.len()).compute(frame);
        }

        let n = frame.len();
        if n == 0 {
            return Vec::new();
        }

        let lag0: f32 = frame.iter().map(|&x| x * x).sum();
        if lag0 <= 0.0 {
            return vec![0.0; n];
        }

        let mut buffer: Vec<Complex<f32>> = frame
            .iter()
            .map(|&x| Complex::new(x, 0.0))
            .chain(std::iter::repeat(Complex::new(0.0, 0.0)))
            .take(self.fft_size)
            .collect();

        self.forward.process(&mut buffer);
        for bin in buffer.iter_mut() {
            *bin = Complex::new(bin.norm_sqr(), 0.0);
        }
        self.inverse.process(&mut buffer);

        // rustfft leaves the inverse transform unscaled
        let scale = self.fft_size as f32 * lag0;
        let mut corr: Vec<f32> = buffer[..n]
            .iter()
            .map(|c| (c.re / scale).clamp(-1.0, 1.0))
            .collect();
        corr[0] = 1.0;
        corr
    }
}

/// Normalized autocorrelation of a single frame
///
/// Convenience wrapper for one-off diagnostic queries; batch callers should
/// hold an [`Autocorrelator`] to reuse its FFT plans.
pub fn autocorrelation(frame: &[f32]) -> Vec<f32> {
    Autocorrelator::new(frame.len()).compute(frame)
}
