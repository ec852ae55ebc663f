//! Configuration management for analysis parameters
//!
//! This module provides runtime configuration loading from JSON files so
//! frame geometry, decision thresholds and the pitch search range can be
//! tuned without recompilation. Every field has a default, and missing
//! sections in a config file fall back to those defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analysis::classifier::Thresholds;
use crate::analysis::features::PitchRange;
use crate::analysis::framing::{check_duration_ms, DEFAULT_FRAME_LENGTH_MS, DEFAULT_FRAME_STRIDE_MS};
use crate::error::AnalysisError;

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub framing: FramingConfig,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub pitch: PitchRange,
}

/// Frame segmentation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FramingConfig {
    /// Frame length in milliseconds
    pub frame_length_ms: f32,
    /// Hop between frames in milliseconds
    pub frame_stride_ms: f32,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            frame_length_ms: DEFAULT_FRAME_LENGTH_MS,
            frame_stride_ms: DEFAULT_FRAME_STRIDE_MS,
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Returns
    /// The parsed configuration, or defaults (with a warning) if the file
    /// cannot be read or parsed
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load_from_file(&path) {
            Ok(config) => {
                log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                config
            }
            Err(err) => {
                log::warn!("[Config] {:#}. Using defaults.", err);
                Self::default()
            }
        }
    }

    /// Load configuration from JSON file, propagating read and parse errors
    pub fn try_load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        use anyhow::Context;

        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON from {:?}", path))
    }

    /// Check that framing and pitch parameters are usable
    ///
    /// Frame durations only need to be positive and finite here. Whether
    /// they round to a usable number of samples depends on the signal's
    /// sample rate and is checked when a signal is analysed. Threshold
    /// ordering is not enforced.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        check_duration_ms("frame_length_ms", self.framing.frame_length_ms)?;
        check_duration_ms("frame_stride_ms", self.framing.frame_stride_ms)?;
        self.pitch.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::VoicingPipeline;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.framing.frame_length_ms, 25.0);
        assert_eq!(config.framing.frame_stride_ms, 10.0);
        assert_eq!(config.thresholds.zcr_threshold, 0.1);
        assert_eq!(config.thresholds.energy_threshold, 1e-4);
        assert_eq!(config.thresholds.silence_threshold, 1e-5);
        assert_eq!(config.pitch.min_hz, 50.0);
        assert_eq!(config.pitch.max_hz, 500.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "thresholds": { "zcr_threshold": 0.2, "energy_threshold": 0.001, "silence_threshold": 0.0001 } }"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.thresholds.zcr_threshold, 0.2);
        assert_eq!(parsed.framing, FramingConfig::default());
        assert_eq!(parsed.pitch, PitchRange::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.framing.frame_length_ms = 0.0;
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidFrameParameter { .. })
        ));

        let mut config = AppConfig::default();
        config.pitch.min_hz = 600.0;
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidPitchRange { .. })
        ));
    }

    #[test]
    fn test_validate_does_not_assume_a_sample_rate() {
        // 0.02 ms is under one sample at 16 kHz but one sample at 48 kHz
        let mut config = AppConfig::default();
        config.framing.frame_stride_ms = 0.02;
        assert!(config.validate().is_ok());

        let pipeline = VoicingPipeline::from_config(&config).unwrap();
        assert!(pipeline.layout(48000).is_ok());
        assert!(matches!(
            pipeline.layout(16000),
            Err(AnalysisError::InvalidFrameParameter {
                name: "frame_stride_ms",
                ..
            })
        ));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = AppConfig::load_from_file("/nonexistent/voicing_config.json");
        assert_eq!(config, AppConfig::default());
        assert!(AppConfig::try_load_from_file("/nonexistent/voicing_config.json").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "voicing_config_test_{}.json",
            std::process::id()
        ));
        fs::write(
            &path,
            r#"{ "framing": { "frame_length_ms": 40.0, "frame_stride_ms": 20.0 } }"#,
        )
        .unwrap();

        let config = AppConfig::try_load_from_file(&path).unwrap();
        assert_eq!(config.framing.frame_length_ms, 40.0);
        assert_eq!(config.thresholds, Thresholds::default());

        fs::remove_file(&path).unwrap();
    }
}
