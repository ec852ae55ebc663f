// Temporal module - Time-domain feature extraction
//
// This module computes features directly from time-domain frames: the
// zero-crossing rate and the short-time energy.
//
// References:
// - Rabiner, L. & Schafer, R. (1978). Digital Processing of Speech Signals
// - Lerch, A. (2012). An Introduction to Audio Content Analysis

/// Sign used for crossing detection; zero counts as non-negative
#[inline]
fn sign(sample: f32) -> i8 {
    if sample >= 0.0 {
        1
    } else {
        -1
    }
}

/// Compute zero-crossing rate (ZCR)
///
/// Formula: ZCR = (1 / (2N)) × Σ|sign(x[n]) - sign(x[n-1])|
///
/// `sign(0)` is +1, so runs of exact zeros (digital silence) and transitions
/// between zero and positive samples never count as crossings. Each change
/// contributes 2 to the sum, so the result equals `changes / N`.
///
/// # Returns
/// Zero-crossing rate (0.0 to 1.0); 0.0 for frames shorter than two samples
pub fn zero_crossing_rate(frame: &[f32]) -> f32 {
    if frame.len() < 2 {
        return 0.0;
    }

    let sign_delta: u32 = frame
        .windows(2)
        .map(|pair| (sign(pair[1]) - sign(pair[0])).unsigned_abs() as u32)
        .sum();

    sign_delta as f32 / (2 * frame.len()) as f32
}

/// Compute short-time energy
///
/// Formula: E = (1 / N) × Σ x[n]²
///
/// The mean, not the raw sum, so the value does not depend on frame length.
/// Squares are accumulated in f64 so long frames lose no precision.
pub fn short_time_energy(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }

    let sum_squares: f64 = frame.iter().map(|&x| x as f64 * x as f64).sum();
    (sum_squares / frame.len() as f64) as f32
}
