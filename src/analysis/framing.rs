// Framing - uniform, overlapping frame extraction
//
// Slices a complete signal into fixed-length frames advanced by a fixed
// stride. The last frame is zero-padded when the signal runs out, so every
// frame has exactly `length` samples and frame `i` starts at `i * stride`.

use crate::error::AnalysisError;

/// Default analysis window length in milliseconds
pub const DEFAULT_FRAME_LENGTH_MS: f32 = 25.0;

/// Default hop between consecutive frames in milliseconds
pub const DEFAULT_FRAME_STRIDE_MS: f32 = 10.0;

/// Largest frame length or stride accepted, in samples
///
/// Keeps a frame buffer within the allocator's `isize::MAX` byte limit.
pub const MAX_FRAME_SAMPLES: usize = isize::MAX as usize / std::mem::size_of::<f32>();

/// One analysis window: exactly `FrameLayout::length` samples
pub type Frame = Vec<f32>;

/// Frame geometry resolved to sample counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameLayout {
    /// Frame length in samples
    pub length: usize,
    /// Hop between frame starts in samples
    pub stride: usize,
}

impl FrameLayout {
    /// Resolve millisecond frame parameters at the given sample rate
    ///
    /// Both values are rounded to the nearest sample. A parameter that is
    /// non-positive, non-finite, or rounds to zero samples is rejected.
    pub fn from_millis(
        sample_rate: u32,
        frame_length_ms: f32,
        frame_stride_ms: f32,
    ) -> Result<Self, AnalysisError> {
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidSampleRate { sample_rate });
        }

        let length = ms_to_samples(sample_rate, frame_length_ms, "frame_length_ms")?;
        let stride = ms_to_samples(sample_rate, frame_stride_ms, "frame_stride_ms")?;

        Ok(Self { length, stride })
    }

    /// Number of frames covering a signal of `signal_len` samples
    ///
    /// `ceil((N - L) / S) + 1`, and exactly one frame when the signal is no
    /// longer than a single frame.
    pub fn frame_count(&self, signal_len: usize) -> usize {
        if signal_len <= self.length {
            1
        } else {
            (signal_len - self.length).div_ceil(self.stride) + 1
        }
    }

    /// Offset of frame `index` in the source signal
    pub fn frame_start(&self, index: usize) -> usize {
        index * self.stride
    }

    /// Start time of frame `index` in seconds
    pub fn frame_start_secs(&self, index: usize, sample_rate: u32) -> f32 {
        self.frame_start(index) as f32 / sample_rate as f32
    }

    /// Sample range of frame `index` that lies inside a signal of `signal_len` samples
    pub fn source_range(&self, index: usize, signal_len: usize) -> std::ops::Range<usize> {
        let start = self.frame_start(index).min(signal_len);
        let end = (start + self.length).min(signal_len);
        start..end
    }

    /// Copy frame `index` out of `signal`, zero-padding past the end
    pub fn frame(&self, signal: &[f32], index: usize) -> Frame {
        let mut frame = vec![0.0; self.length];
        let range = self.source_range(index, signal.len());
        let copied = range.len();
        frame[..copied].copy_from_slice(&signal[range]);
        frame
    }

    /// Copy every frame out of `signal`, zero-padding the tail
    pub fn slice(&self, signal: &[f32]) -> Result<Vec<Frame>, AnalysisError> {
        if signal.is_empty() {
            return Err(AnalysisError::EmptySignal);
        }

        let frame_count = self.frame_count(signal.len());
        Ok((0..frame_count).map(|i| self.frame(signal, i)).collect())
    }
}

/// Reject a frame duration that is zero, negative or not finite
///
/// Independent of sample rate; rounding to samples is checked by
/// [`FrameLayout::from_millis`].
pub fn check_duration_ms(name: &'static str, ms: f32) -> Result<(), AnalysisError> {
    if !ms.is_finite() || ms <= 0.0 {
        return Err(AnalysisError::InvalidFrameParameter {
            name,
            value: ms,
            reason: "must be a positive, finite duration",
        });
    }
    Ok(())
}

fn ms_to_samples(sample_rate: u32, ms: f32, name: &'static str) -> Result<usize, AnalysisError> {
    check_duration_ms(name, ms)?;

    let samples = (sample_rate as f64 * ms as f64 / 1000.0).round();
    if samples < 1.0 {
        return Err(AnalysisError::InvalidFrameParameter {
            name,
            value: ms,
            reason: "rounds to zero samples at this sample rate",
        });
    }
    if samples > MAX_FRAME_SAMPLES as f64 {
        return Err(AnalysisError::InvalidFrameParameter {
            name,
            value: ms,
            reason: "exceeds the largest supported frame size",
        });
    }

    Ok(samples as usize)
}

/// Split `signal` into overlapping, zero-padded frames
///
/// # Arguments
/// * `signal` - Mono samples, conventionally in [-1, 1]
/// * `sample_rate` - Sample rate in Hz
/// * `frame_length_ms` - Frame length in milliseconds (default 25)
/// * `frame_stride_ms` - Hop between frames in milliseconds (default 10)
///
/// # Returns
/// Frames in signal order, each exactly `round(sample_rate * frame_length_ms / 1000)` long
pub fn extract_frames(
    signal: &[f32],
    sample_rate: u32,
    frame_length_ms: f32,
    frame_stride_ms: f32,
) -> Result<Vec<Frame>, AnalysisError> {
    FrameLayout::from_millis(sample_rate, frame_length_ms, frame_stride_ms)?.slice(signal)
}
