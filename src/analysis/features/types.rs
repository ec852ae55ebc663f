// Types module - Data structures for per-frame features
//
// This module defines the core data structures produced by the feature
// extraction pipeline and consumed by the classifier and report writers.

/// Features extracted from one analysis frame
///
/// Derived entirely from the frame's samples and the sample rate; carries no
/// cross-frame state.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FeatureSet {
    /// Zero-crossing rate (0.0 to 1.0)
    ///
    /// Fraction of adjacent-sample sign changes. Low for periodic, vowel-like
    /// content; high for noise-like content.
    pub zcr: f32,

    /// Short-time energy (mean squared amplitude, >= 0)
    pub energy: f32,

    /// Autocorrelation normalized by its lag-0 value
    ///
    /// Same length as the frame. All zeros for a perfectly silent frame.
    pub autocorrelation: Vec<f32>,

    /// Estimated fundamental frequency in Hz (0.0 when unvoiced)
    pub pitch_hz: f32,

    /// Whether the autocorrelation peak indicates periodicity
    pub is_voiced_pitch: bool,
}

impl FeatureSet {
    /// Drop the autocorrelation array, keeping the scalar columns
    pub fn scalars(&self) -> FrameFeatures {
        FrameFeatures {
            zcr: self.zcr,
            energy: self.energy,
            pitch_hz: self.pitch_hz,
        }
    }
}

/// One row of the per-frame feature table: `[zcr, energy, pitch]`
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameFeatures {
    pub zcr: f32,
    pub energy: f32,
    pub pitch_hz: f32,
}

impl FrameFeatures {
    /// Row as a fixed-width array in column order
    pub fn as_row(&self) -> [f32; 3] {
        [self.zcr, self.energy, self.pitch_hz]
    }
}
