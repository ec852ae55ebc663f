// WAV I/O - decode mono WAV files to f32 samples and write f32 WAV files
//
// Integer PCM is scaled to [-1, 1] by the largest positive value of its bit
// depth. Multi-channel files are rejected rather than downmixed.

use std::path::Path;

use crate::error::AudioIoError;

/// Decoded mono signal and its sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Signal {
    /// Duration in seconds (0.0 for a zero sample rate)
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Read a mono WAV file
///
/// Supports 32-bit float and 8/16/24/32-bit integer PCM.
pub fn read_wav_mono<P: AsRef<Path>>(path: P) -> Result<Signal, AudioIoError> {
    let path = path.as_ref();
    let read_failed = |err: hound::Error| AudioIoError::ReadFailed {
        path: path.display().to_string(),
        details: err.to_string(),
    };

    let mut reader = hound::WavReader::open(path).map_err(read_failed)?;
    let spec = reader.spec();
    if spec.channels != 1 {
        return Err(AudioIoError::NotMono {
            path: path.display().to_string(),
            channels: spec.channels,
        });
    }

    let samples = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .collect::<Result<Vec<f32>, _>>()
            .map_err(read_failed)?,
        (hound::SampleFormat::Int, bits @ (8 | 16 | 24 | 32)) => {
            let max = ((1i64 << (bits - 1)) - 1) as f32;
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|value| value as f32 / max))
                .collect::<Result<Vec<f32>, _>>()
                .map_err(read_failed)?
        }
        (format, bits) => {
            return Err(AudioIoError::UnsupportedFormat {
                path: path.display().to_string(),
                details: format!("{:?} with {} bits per sample", format, bits),
            })
        }
    };

    log::debug!(
        "[Wav] Read {} samples @ {} Hz from {}",
        samples.len(),
        spec.sample_rate,
        path.display()
    );

    Ok(Signal {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// Write samples as a mono 32-bit float WAV file
pub fn write_wav_mono<P: AsRef<Path>>(
    path: P,
    samples: &[f32],
    sample_rate: u32,
) -> Result<(), AudioIoError> {
    let path = path.as_ref();
    let write_failed = |err: hound::Error| AudioIoError::WriteFailed {
        path: path.display().to_string(),
        details: err.to_string(),
    };

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = hound::WavWriter::create(path, spec).map_err(write_failed)?;
    for &sample in samples {
        writer.write_sample(sample).map_err(write_failed)?;
    }
    writer.finalize().map_err(write_failed)?;

    Ok(())
}
