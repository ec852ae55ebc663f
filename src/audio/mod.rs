// Audio module - WAV file loading and writing for the analysis pipeline

pub mod wav;

// Re-export commonly used types for convenience
pub use wav::{read_wav_mono, write_wav_mono, Signal};
