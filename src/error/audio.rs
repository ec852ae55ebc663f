// Audio I/O error types and constants

use crate::error::ErrorCode;
use log::error;
use thiserror::Error;

/// Audio I/O error code constants
///
/// Error code range: 4001-4004
pub struct AudioIoErrorCodes {}

impl AudioIoErrorCodes {
    /// WAV file could not be opened or decoded
    pub const READ_FAILED: i32 = 4001;

    /// WAV file has more than one channel
    pub const NOT_MONO: i32 = 4002;

    /// Sample format or bit depth is not supported
    pub const UNSUPPORTED_FORMAT: i32 = 4003;

    /// WAV file could not be created or written
    pub const WRITE_FAILED: i32 = 4004;
}

/// Log an audio I/O error with structured context
pub fn log_audio_error(err: &AudioIoError, context: &str) {
    error!(
        "Audio I/O error in {}: code={}, component=WavIo, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised while decoding or writing WAV files
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AudioIoError {
    #[error("Failed to read {path}: {details}")]
    ReadFailed { path: String, details: String },

    #[error("{path} must be mono (found {channels} channels)")]
    NotMono { path: String, channels: u16 },

    #[error("Unsupported sample format in {path}: {details}")]
    UnsupportedFormat { path: String, details: String },

    #[error("Failed to write {path}: {details}")]
    WriteFailed { path: String, details: String },
}

impl ErrorCode for AudioIoError {
    fn code(&self) -> i32 {
        match self {
            AudioIoError::ReadFailed { .. } => AudioIoErrorCodes::READ_FAILED,
            AudioIoError::NotMono { .. } => AudioIoErrorCodes::NOT_MONO,
            AudioIoError::UnsupportedFormat { .. } => AudioIoErrorCodes::UNSUPPORTED_FORMAT,
            AudioIoError::WriteFailed { .. } => AudioIoErrorCodes::WRITE_FAILED,
        }
    }

    fn message(&self) -> String {
        self.to_string()
    }
}
