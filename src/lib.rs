// Voicing Classifier Core - frame-level silent / unvoiced / voiced analysis
// Classical feature pipeline: framing, ZCR, energy, autocorrelation pitch

// Module declarations
pub mod analysis;
pub mod audio;
pub mod config;
pub mod error;
pub mod report;

// Re-exports for convenience
pub use analysis::classifier::{Classifier, Thresholds, VoicingClass};
pub use analysis::features::{FeatureExtractor, FeatureSet, FrameFeatures};
pub use analysis::framing::{extract_frames, FrameLayout};
pub use analysis::{process, FrameDiagnostic, PipelineOutput, VoicingPipeline};
pub use config::AppConfig;
pub use error::{AnalysisError, AudioIoError, ErrorCode};
