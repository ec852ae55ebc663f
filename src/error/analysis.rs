// Analysis error types and constants

use crate::error::ErrorCode;
use log::error;
use thiserror::Error;

/// Analysis error code constants
///
/// Single source of truth for the numeric codes reported by [`AnalysisError`].
///
/// Error code range: 3001-3005
pub struct AnalysisErrorCodes {}

impl AnalysisErrorCodes {
    /// Signal contains no samples
    pub const EMPTY_SIGNAL: i32 = 3001;

    /// Sample rate is zero
    pub const INVALID_SAMPLE_RATE: i32 = 3002;

    /// Frame length or stride is non-positive, non-finite, or rounds to zero samples
    pub const INVALID_FRAME_PARAMETER: i32 = 3003;

    /// Pitch search bounds are non-positive or inverted
    pub const INVALID_PITCH_RANGE: i32 = 3004;

    /// Requested frame index is past the end of the frame sequence
    pub const FRAME_OUT_OF_RANGE: i32 = 3005;
}

/// Log an analysis error with structured context
///
/// Logs the error code, the component and the human-readable message.
pub fn log_analysis_error(err: &AnalysisError, context: &str) {
    error!(
        "Analysis error in {}: code={}, component=VoicingPipeline, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Analysis-related errors
///
/// Every variant is a caller configuration error (InvalidInput). Degenerate
/// data such as all-zero frames never produces an error.
///
/// Error code ranges: 3001-3005
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Signal contains no samples
    #[error("Signal is empty")]
    EmptySignal,

    /// Sample rate is zero
    #[error("Sample rate must be greater than 0 (got {sample_rate})")]
    InvalidSampleRate { sample_rate: u32 },

    /// Frame length or stride is unusable
    #[error("Invalid {name}: {value} ms ({reason})")]
    InvalidFrameParameter {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },

    /// Pitch search bounds are unusable
    #[error("Invalid pitch range: min {min_hz} Hz, max {max_hz} Hz")]
    InvalidPitchRange { min_hz: f32, max_hz: f32 },

    /// Frame index past the end of the frame sequence
    #[error("Frame index {index} out of range (frame count {frame_count})")]
    FrameOutOfRange { index: usize, frame_count: usize },
}

impl ErrorCode for AnalysisError {
    fn code(&self) -> i32 {
        match self {
            AnalysisError::EmptySignal => AnalysisErrorCodes::EMPTY_SIGNAL,
            AnalysisError::InvalidSampleRate { .. } => AnalysisErrorCodes::INVALID_SAMPLE_RATE,
            AnalysisError::InvalidFrameParameter { .. } => {
                AnalysisErrorCodes::INVALID_FRAME_PARAMETER
            }
            AnalysisError::InvalidPitchRange { .. } => AnalysisErrorCodes::INVALID_PITCH_RANGE,
            AnalysisError::FrameOutOfRange { .. } => AnalysisErrorCodes::FRAME_OUT_OF_RANGE,
        }
    }

    fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_error_codes() {
        assert_eq!(AnalysisError::EmptySignal.code(), 3001);
        assert_eq!(
            AnalysisError::InvalidSampleRate { sample_rate: 0 }.code(),
            3002
        );
        assert_eq!(
            AnalysisError::InvalidFrameParameter {
                name: "frame_length_ms",
                value: 0.0,
                reason: "must be positive",
            }
            .code(),
            3003
        );
        assert_eq!(
            AnalysisError::InvalidPitchRange {
                min_hz: 500.0,
                max_hz: 50.0
            }
            .code(),
            3004
        );
        assert_eq!(
            AnalysisError::FrameOutOfRange {
                index: 10,
                frame_count: 3
            }
            .code(),
            3005
        );
    }

    #[test]
    fn test_analysis_error_messages() {
        let err = AnalysisError::InvalidSampleRate { sample_rate: 0 };
        assert!(err.message().contains("greater than 0"));

        let err = AnalysisError::InvalidFrameParameter {
            name: "frame_stride_ms",
            value: -5.0,
            reason: "must be positive",
        };
        let msg = err.message();
        assert!(msg.contains("frame_stride_ms"));
        assert!(msg.contains("-5"));
    }

    #[test]
    fn test_analysis_error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&AnalysisError::EmptySignal);
    }
}
