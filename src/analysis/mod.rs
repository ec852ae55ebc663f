// Analysis module - frame segmentation and voicing classification pipeline
//
// This module orchestrates the complete analysis of a pre-loaded mono signal.
//
// Architecture:
// - Pipeline: FrameLayout (framing) → FeatureExtractor → Classifier
// - Every frame's features and label depend only on that frame's samples and
//   the fixed configuration, so the pipeline is an order-preserving map over
//   the frame sequence
// - Output: PipelineOutput (frames, feature table, labels) for report and
//   export collaborators

pub mod classifier;
pub mod features;
pub mod framing;
pub mod segments;

use classifier::{Classifier, Thresholds, VoicingClass};
use features::{FeatureExtractor, FeatureSet, FrameFeatures, PitchRange};
use framing::{Frame, FrameLayout, DEFAULT_FRAME_LENGTH_MS, DEFAULT_FRAME_STRIDE_MS};
use segments::{split_by_class, ClassSegments, ClassificationSummary};

use crate::config::AppConfig;
use crate::error::{log_analysis_error, AnalysisError};

/// Result of running the pipeline over one signal
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Sample rate the signal was analysed at
    pub sample_rate: u32,
    /// Frame geometry in samples
    pub layout: FrameLayout,
    /// Zero-padded frames in signal order
    pub frames: Vec<Frame>,
    /// Per-frame `[zcr, energy, pitch]` rows
    pub features: Vec<FrameFeatures>,
    /// Per-frame labels
    pub labels: Vec<VoicingClass>,
}

impl PipelineOutput {
    /// Number of frames analysed
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Per-class frame counts
    pub fn summary(&self) -> ClassificationSummary {
        ClassificationSummary::from_labels(&self.labels)
    }

    /// Source audio grouped by frame label
    pub fn split_by_class(&self, signal: &[f32]) -> ClassSegments {
        split_by_class(signal, self.layout, &self.labels)
    }

    /// Start time of frame `index` in seconds
    pub fn frame_start_secs(&self, index: usize) -> f32 {
        self.layout.frame_start_secs(index, self.sample_rate)
    }
}

/// Full diagnostic view of one frame, including its autocorrelation
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FrameDiagnostic {
    pub index: usize,
    pub start_secs: f32,
    pub label: VoicingClass,
    pub thresholds: Thresholds,
    pub features: FeatureSet,
}

/// VoicingPipeline runs framing, feature extraction and classification
///
/// Immutable after construction; `process` takes `&self` and can be called
/// concurrently.
#[derive(Debug, Clone)]
pub struct VoicingPipeline {
    classifier: Classifier,
    frame_length_ms: f32,
    frame_stride_ms: f32,
    pitch_range: PitchRange,
}

impl Default for VoicingPipeline {
    fn default() -> Self {
        Self::new(Classifier::default())
    }
}

impl VoicingPipeline {
    /// Create a pipeline with default 25 ms / 10 ms framing
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier,
            frame_length_ms: DEFAULT_FRAME_LENGTH_MS,
            frame_stride_ms: DEFAULT_FRAME_STRIDE_MS,
            pitch_range: PitchRange::default(),
        }
    }

    /// Create a pipeline from validated application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self {
            classifier: Classifier::new(config.thresholds),
            frame_length_ms: config.framing.frame_length_ms,
            frame_stride_ms: config.framing.frame_stride_ms,
            pitch_range: config.pitch,
        })
    }

    /// Override frame length and stride (milliseconds)
    pub fn with_framing(mut self, frame_length_ms: f32, frame_stride_ms: f32) -> Self {
        self.frame_length_ms = frame_length_ms;
        self.frame_stride_ms = frame_stride_ms;
        self
    }

    /// Override the pitch search range
    pub fn with_pitch_range(mut self, pitch_range: PitchRange) -> Self {
        self.pitch_range = pitch_range;
        self
    }

    /// Classifier (and therefore thresholds) used by this pipeline
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Resolve the frame geometry for `sample_rate`
    pub fn layout(&self, sample_rate: u32) -> Result<FrameLayout, AnalysisError> {
        FrameLayout::from_millis(sample_rate, self.frame_length_ms, self.frame_stride_ms)
    }

    /// Segment, extract and classify a whole signal
    ///
    /// # Errors
    /// `EmptySignal`, `InvalidSampleRate` or `InvalidFrameParameter` for
    /// unusable input. Silent or degenerate frames are never errors.
    pub fn process(&self, signal: &[f32], sample_rate: u32) -> Result<PipelineOutput, AnalysisError> {
        self.run(signal, sample_rate).map_err(|err| {
            log_analysis_error(&err, "process");
            err
        })
    }

    fn run(&self, signal: &[f32], sample_rate: u32) -> Result<PipelineOutput, AnalysisError> {
        self.pitch_range.validate()?;
        let layout = self.layout(sample_rate)?;
        let frames = layout.slice(signal)?;

        let extractor = FeatureExtractor::with_pitch_range(layout.length, self.pitch_range);
        let (features, labels) = self
            .classifier
            .classify_frames(&extractor, &frames, sample_rate);

        log::debug!(
            "[Pipeline] {} samples @ {} Hz -> {} frames (length {}, stride {})",
            signal.len(),
            sample_rate,
            frames.len(),
            layout.length,
            layout.stride
        );

        Ok(PipelineOutput {
            sample_rate,
            layout,
            frames,
            features,
            labels,
        })
    }

    /// Extract full features for a single frame of `signal`
    ///
    /// # Errors
    /// Same input errors as [`VoicingPipeline::process`], plus
    /// `FrameOutOfRange` when `index` is past the last frame.
    pub fn diagnose_frame(
        &self,
        signal: &[f32],
        sample_rate: u32,
        index: usize,
    ) -> Result<FrameDiagnostic, AnalysisError> {
        self.inspect_frame(signal, sample_rate, index).map_err(|err| {
            log_analysis_error(&err, "diagnose_frame");
            err
        })
    }

    fn inspect_frame(
        &self,
        signal: &[f32],
        sample_rate: u32,
        index: usize,
    ) -> Result<FrameDiagnostic, AnalysisError> {
        self.pitch_range.validate()?;
        let layout = self.layout(sample_rate)?;
        if signal.is_empty() {
            return Err(AnalysisError::EmptySignal);
        }

        let frame_count = layout.frame_count(signal.len());
        if index >= frame_count {
            return Err(AnalysisError::FrameOutOfRange { index, frame_count });
        }

        let frame = layout.frame(signal, index);

        let extractor = FeatureExtractor::with_pitch_range(layout.length, self.pitch_range);
        let features = extractor.extract(&frame, sample_rate);

        Ok(FrameDiagnostic {
            index,
            start_secs: layout.frame_start_secs(index, sample_rate),
            label: self.classifier.classify(&features),
            thresholds: self.classifier.thresholds(),
            features,
        })
    }
}

/// Segment, extract and classify with default framing and the given classifier
pub fn process(
    classifier: &Classifier,
    signal: &[f32],
    sample_rate: u32,
) -> Result<PipelineOutput, AnalysisError> {
    VoicingPipeline::new(classifier.clone()).process(signal, sample_rate)
}
