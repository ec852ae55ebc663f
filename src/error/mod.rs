// Error types for the voicing classifier
//
// This module defines custom error types for analysis and audio I/O operations,
// providing structured error handling with stable numeric codes that CLI and
// report consumers can match on.

mod analysis;
mod audio;

pub use analysis::{log_analysis_error, AnalysisError, AnalysisErrorCodes};
pub use audio::{log_audio_error, AudioIoError, AudioIoErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// the library and its command-line front-end.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
