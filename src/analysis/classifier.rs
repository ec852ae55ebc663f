// Classifier - rule-based voicing classification
//
// This module implements an ordered threshold rule that labels each frame as
// silent, unvoiced or voiced from its extracted features:
//
// 1. IF energy < silence_threshold THEN Silent
// 2. ELSE IF zcr < zcr_threshold AND energy > energy_threshold AND voiced pitch THEN Voiced
// 3. ELSE Unvoiced
//
// The silence check short-circuits: a low-energy frame is never relabelled by
// its ZCR or pitch. Unvoiced is the fallback for everything that is neither
// clearly silent nor clearly periodic.

use crate::analysis::features::{FeatureExtractor, FeatureSet, FrameFeatures};

/// Default ZCR ceiling for voiced frames
pub const DEFAULT_ZCR_THRESHOLD: f32 = 0.1;

/// Default energy floor for voiced frames
pub const DEFAULT_ENERGY_THRESHOLD: f32 = 1e-4;

/// Default energy below which a frame is silent
pub const DEFAULT_SILENCE_THRESHOLD: f32 = 1e-5;

/// Frame classification label
///
/// Serialized and converted as its integer code: 0 = silent, 1 = unvoiced,
/// 2 = voiced.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum VoicingClass {
    /// Near-zero energy
    Silent = 0,
    /// Energetic but aperiodic (fricative- or noise-like)
    Unvoiced = 1,
    /// Periodic, vowel-like
    Voiced = 2,
}

impl VoicingClass {
    /// All classes in label order
    pub const ALL: [VoicingClass; 3] = [
        VoicingClass::Silent,
        VoicingClass::Unvoiced,
        VoicingClass::Voiced,
    ];

    /// Integer label code
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Lowercase class name
    pub fn name(self) -> &'static str {
        match self {
            VoicingClass::Silent => "silent",
            VoicingClass::Unvoiced => "unvoiced",
            VoicingClass::Voiced => "voiced",
        }
    }
}

impl From<VoicingClass> for u8 {
    fn from(class: VoicingClass) -> Self {
        class.code()
    }
}

impl TryFrom<u8> for VoicingClass {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(VoicingClass::Silent),
            1 => Ok(VoicingClass::Unvoiced),
            2 => Ok(VoicingClass::Voiced),
            other => Err(format!("invalid voicing label {}", other)),
        }
    }
}

impl std::fmt::Display for VoicingClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Decision thresholds
///
/// `silence_threshold < energy_threshold` is assumed by the decision rule but
/// not enforced; an inverted pair is a caller error.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Thresholds {
    /// Frames with ZCR at or above this are never voiced
    pub zcr_threshold: f32,
    /// Voiced frames need energy strictly above this
    pub energy_threshold: f32,
    /// Frames with energy strictly below this are silent
    pub silence_threshold: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            zcr_threshold: DEFAULT_ZCR_THRESHOLD,
            energy_threshold: DEFAULT_ENERGY_THRESHOLD,
            silence_threshold: DEFAULT_SILENCE_THRESHOLD,
        }
    }
}

/// Classifier applies the ordered threshold rule to extracted features
///
/// Owns only its thresholds, fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    thresholds: Thresholds,
}

impl Classifier {
    /// Create a Classifier with the given thresholds
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds this classifier decides with (for plot annotation and reports)
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Classify one frame from its features
    ///
    /// Pure: the same features always produce the same label.
    pub fn classify(&self, features: &FeatureSet) -> VoicingClass {
        let t = &self.thresholds;

        if features.energy < t.silence_threshold {
            return VoicingClass::Silent;
        }

        if features.zcr < t.zcr_threshold
            && features.energy > t.energy_threshold
            && features.is_voiced_pitch
        {
            VoicingClass::Voiced
        } else {
            VoicingClass::Unvoiced
        }
    }

    /// Extract features from and classify every frame
    ///
    /// Uses the default pitch search range. Output order matches `frames`.
    ///
    /// # Returns
    /// Tuple of (per-frame `[zcr, energy, pitch]` rows, per-frame labels)
    pub fn classify_all(
        &self,
        frames: &[Vec<f32>],
        sample_rate: u32,
    ) -> (Vec<FrameFeatures>, Vec<VoicingClass>) {
        let frame_length = frames.first().map(Vec::len).unwrap_or(0);
        let extractor = FeatureExtractor::new(frame_length);
        self.classify_frames(&extractor, frames, sample_rate)
    }

    /// Extract features with `extractor` and classify every frame
    ///
    /// Each frame is handled independently; output order matches `frames`.
    pub fn classify_frames(
        &self,
        extractor: &FeatureExtractor,
        frames: &[Vec<f32>],
        sample_rate: u32,
    ) -> (Vec<FrameFeatures>, Vec<VoicingClass>) {
        frames
            .iter()
            .map(|frame| {
                let features = extractor.extract(frame, sample_rate);
                (features.scalars(), self.classify(&features))
            })
            .unzip()
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
