//! Serializable analysis reports and per-class audio export
//!
//! Reports flatten a [`PipelineOutput`] into JSON-friendly rows so that
//! plotting or export tools can consume results without linking the crate.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::classifier::{Thresholds, VoicingClass};
use crate::analysis::framing::FrameLayout;
use crate::analysis::segments::{ClassSegments, ClassificationSummary};
use crate::analysis::PipelineOutput;
use crate::audio::write_wav_mono;
use crate::error::AudioIoError;

/// One row of the per-frame report table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub index: usize,
    pub start_secs: f32,
    pub zcr: f32,
    pub energy: f32,
    pub pitch_hz: f32,
    pub label: VoicingClass,
}

/// Whole-signal analysis report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub sample_rate: u32,
    pub duration_secs: f32,
    pub frame_count: usize,
    pub layout: FrameLayout,
    pub thresholds: Thresholds,
    pub summary: ClassificationSummary,
    pub frames: Vec<FrameRecord>,
}

impl AnalysisReport {
    /// Build a report from pipeline output
    ///
    /// # Arguments
    /// * `source` - Optional label for the analysed input (e.g. file path)
    /// * `signal_len` - Number of samples in the analysed signal
    /// * `thresholds` - Thresholds the labels were produced with
    /// * `output` - Pipeline result
    pub fn build(
        source: Option<String>,
        signal_len: usize,
        thresholds: Thresholds,
        output: &PipelineOutput,
    ) -> Self {
        let frames = output
            .features
            .iter()
            .zip(output.labels.iter())
            .enumerate()
            .map(|(index, (features, &label))| FrameRecord {
                index,
                start_secs: output.frame_start_secs(index),
                zcr: features.zcr,
                energy: features.energy,
                pitch_hz: features.pitch_hz,
                label,
            })
            .collect();

        Self {
            source,
            sample_rate: output.sample_rate,
            duration_secs: signal_len as f32 / output.sample_rate as f32,
            frame_count: output.frame_count(),
            layout: output.layout,
            thresholds,
            summary: output.summary(),
            frames,
        }
    }
}

/// File name used for a class's exported audio
pub fn segment_file_name(class: VoicingClass) -> String {
    format!("{}.wav", class.name())
}

/// Write each class's concatenated audio to `<dir>/<class>.wav`
///
/// Empty classes still produce a (zero-length) file.
///
/// # Returns
/// Paths written, in label order (silent, unvoiced, voiced)
pub fn write_class_segments(
    dir: &Path,
    segments: &ClassSegments,
    sample_rate: u32,
) -> Result<Vec<PathBuf>, AudioIoError> {
    VoicingClass::ALL
        .iter()
        .map(|&class| {
            let path = dir.join(segment_file_name(class));
            let samples = segments.get(class);
            write_wav_mono(&path, samples, sample_rate)?;
            log::info!(
                "[Report] Wrote {} ({:.2} seconds)",
                path.display(),
                samples.len() as f32 / sample_rate as f32
            );
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::VoicingPipeline;
    use crate::audio::read_wav_mono;

    #[test]
    fn test_report_rows_follow_output() {
        let pipeline = VoicingPipeline::default();
        let mut signal = vec![0.0; 4000];
        signal.extend((0..4000).map(|i| {
            0.5 * (2.0 * std::f32::consts::PI * 150.0 * i as f32 / 16000.0).sin()
        }));
        let output = pipeline.process(&signal, 16000).unwrap();

        let report = AnalysisReport::build(
            Some("tone.wav".to_string()),
            signal.len(),
            pipeline.classifier().thresholds(),
            &output,
        );

        assert_eq!(report.frame_count, output.frame_count());
        assert_eq!(report.frames.len(), output.frame_count());
        assert_eq!(report.duration_secs, 0.5);
        assert_eq!(report.frames[3].start_secs, 0.03);
        assert_eq!(report.frames[0].label, VoicingClass::Silent);
        assert_eq!(report.summary, output.summary());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["source"], "tone.wav");
        assert_eq!(json["frames"][0]["label"], 0);
        assert_eq!(json["layout"]["length"], 400);
    }

    #[test]
    fn test_report_without_source_omits_field() {
        let output = VoicingPipeline::default()
            .process(&[0.0; 400], 16000)
            .unwrap();
        let report = AnalysisReport::build(None, 400, Thresholds::default(), &output);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("source").is_none());
    }

    #[test]
    fn test_write_class_segments() {
        let dir = std::env::temp_dir().join(format!("voicing_segments_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let segments = ClassSegments {
            silent: vec![0.0; 10],
            unvoiced: Vec::new(),
            voiced: vec![0.5; 20],
        };
        let paths = write_class_segments(&dir, &segments, 16000).unwrap();

        assert_eq!(paths.len(), 3);
        assert!(paths[0].ends_with("silent.wav"));
        assert_eq!(read_wav_mono(&paths[0]).unwrap().samples.len(), 10);
        assert!(read_wav_mono(&paths[1]).unwrap().samples.is_empty());
        assert_eq!(read_wav_mono(&paths[2]).unwrap().samples, vec![0.5; 20]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
