// FeatureExtractor - per-frame acoustic features for voicing classification
//
// This module extracts the features used to separate silent, unvoiced and
// voiced frames. Every feature is computed from a single frame and the sample
// rate; nothing carries over between frames.
//
// Module organization:
// - types: Data structures (FeatureSet, FrameFeatures)
// - temporal: Time-domain features (ZCR, short-time energy)
// - autocorrelation: FFT-based normalized autocorrelation
// - pitch: Autocorrelation peak picking and voicing decision
// - mod.rs: Coordinator (FeatureExtractor)
//
// Features extracted:
// 1. Zero-Crossing Rate (ZCR): Rate of sign changes (noisiness measure)
// 2. Short-Time Energy: Mean squared amplitude (loudness measure)
// 3. Autocorrelation: Self-similarity across lags (periodicity measure)
// 4. Pitch + voicing flag: Autocorrelation peak within the pitch range
//
// References:
// - Rabiner, L. & Schafer, R. (1978). Digital Processing of Speech Signals
// - Lerch, A. (2012). An Introduction to Audio Content Analysis

mod autocorrelation;
mod pitch;
mod temporal;
mod types;

pub use autocorrelation::{autocorrelation, Autocorrelator};
pub use pitch::{
    pitch_and_voicing, PitchEstimate, PitchRange, DEFAULT_MAX_PITCH_HZ, DEFAULT_MIN_PITCH_HZ,
    VOICING_THRESHOLD,
};
pub use temporal::{short_time_energy, zero_crossing_rate};
pub use types::{FeatureSet, FrameFeatures};

/// FeatureExtractor coordinates per-frame feature extraction
///
/// Holds the autocorrelation FFT plans for the expected frame length and the
/// pitch search range. Extraction takes `&self` and has no side effects, so a
/// single extractor can be shared across threads.
pub struct FeatureExtractor {
    autocorrelator: Autocorrelator,
    pitch_range: PitchRange,
}

impl FeatureExtractor {
    /// Create a FeatureExtractor for frames of `frame_length` samples
    ///
    /// Uses the default 50-500 Hz pitch search range.
    pub fn new(frame_length: usize) -> Self {
        Self::with_pitch_range(frame_length, PitchRange::default())
    }

    /// Create a FeatureExtractor with a custom pitch search range
    pub fn with_pitch_range(frame_length: usize, pitch_range: PitchRange) -> Self {
        Self {
            autocorrelator: Autocorrelator::new(frame_length),
            pitch_range,
        }
    }

    /// Pitch search range used by this extractor
    pub fn pitch_range(&self) -> PitchRange {
        self.pitch_range
    }

    /// Extract all features from one frame
    ///
    /// 1. Zero-crossing rate and short-time energy from the samples
    /// 2. Normalized autocorrelation via FFT
    /// 3. Pitch and voicing from the autocorrelation peak
    pub fn extract(&self, frame: &[f32], sample_rate: u32) -> FeatureSet {
        let zcr = zero_crossing_rate(frame);
        let energy = short_time_energy(frame);
        let autocorrelation = self.autocorrelator.compute(frame);
        let pitch = pitch_and_voicing(&autocorrelation, sample_rate, self.pitch_range);

        FeatureSet {
            zcr,
            energy,
            autocorrelation,
            pitch_hz: pitch.pitch_hz,
            is_voiced_pitch: pitch.is_voiced,
        }
    }
}

/// Extract all features from one frame with the default pitch range
///
/// One-off form of [`FeatureExtractor::extract`] for diagnostic queries.
pub fn extract(frame: &[f32], sample_rate: u32) -> FeatureSet {
    FeatureExtractor::new(frame.len()).extract(frame, sample_rate)
}
