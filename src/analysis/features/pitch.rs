// Pitch module - autocorrelation peak picking
//
// Estimates the fundamental frequency of a frame from its normalized
// autocorrelation. The peak search is restricted to lags that correspond to
// a plausible voice pitch range, which rejects the trivial peak at lag 0 and
// spurious sub-period peaks.

use crate::error::AnalysisError;

/// Peak height above which a frame is considered periodic
///
/// Intrinsic to autocorrelation pitch detection; not a classifier setting.
pub const VOICING_THRESHOLD: f32 = 0.3;

/// Default lowest pitch searched, in Hz
pub const DEFAULT_MIN_PITCH_HZ: f32 = 50.0;

/// Default highest pitch searched, in Hz
pub const DEFAULT_MAX_PITCH_HZ: f32 = 500.0;

/// Pitch search bounds in Hz
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PitchRange {
    pub min_hz: f32,
    pub max_hz: f32,
}

impl Default for PitchRange {
    fn default() -> Self {
        Self {
            min_hz: DEFAULT_MIN_PITCH_HZ,
            max_hz: DEFAULT_MAX_PITCH_HZ,
        }
    }
}

impl PitchRange {
    /// Create a validated pitch range
    pub fn new(min_hz: f32, max_hz: f32) -> Result<Self, AnalysisError> {
        let range = Self { min_hz, max_hz };
        range.validate()?;
        Ok(range)
    }

    /// Check that both bounds are positive, finite and ordered
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let valid = self.min_hz.is_finite()
            && self.max_hz.is_finite()
            && self.min_hz > 0.0
            && self.max_hz > self.min_hz;
        if valid {
            Ok(())
        } else {
            Err(AnalysisError::InvalidPitchRange {
                min_hz: self.min_hz,
                max_hz: self.max_hz,
            })
        }
    }

    /// Lag search window `[min_lag, max_lag)` for an autocorrelation of `len` values
    ///
    /// `min_lag = round(sr / max_hz)`, `max_lag = round(sr / min_hz)` clamped to
    /// `len - 1`. Returns `None` when the clamped window is empty.
    pub fn lag_window(&self, sample_rate: u32, len: usize) -> Option<(usize, usize)> {
        if len < 2 {
            return None;
        }

        let sr = sample_rate as f64;
        let min_lag = (sr / self.max_hz as f64).round() as usize;
        let max_lag = ((sr / self.min_hz as f64).round() as usize).min(len - 1);

        if min_lag >= max_lag {
            None
        } else {
            Some((min_lag, max_lag))
        }
    }
}

/// Result of pitch estimation for one frame
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PitchEstimate {
    /// Estimated fundamental frequency in Hz (0.0 when unvoiced)
    pub pitch_hz: f32,
    /// Whether the autocorrelation peak exceeded [`VOICING_THRESHOLD`]
    pub is_voiced: bool,
}

impl PitchEstimate {
    /// Estimate reported when no periodicity was found
    pub const UNVOICED: PitchEstimate = PitchEstimate {
        pitch_hz: 0.0,
        is_voiced: false,
    };
}

/// Estimate pitch and voicing from a normalized autocorrelation
///
/// Finds the highest autocorrelation value within the lag window of `range`
/// (first maximum on ties). The frame is voiced when that peak exceeds
/// [`VOICING_THRESHOLD`], and the pitch is `sample_rate / peak_lag`.
///
/// A collapsed search window (very low sample rate or very short frame)
/// degrades to [`PitchEstimate::UNVOICED`].
pub fn pitch_and_voicing(
    autocorrelation: &[f32],
    sample_rate: u32,
    range: PitchRange,
) -> PitchEstimate {
    let Some((min_lag, max_lag)) = range.lag_window(sample_rate, autocorrelation.len()) else {
        return PitchEstimate::UNVOICED;
    };

    let (peak_lag, peak_value) = autocorrelation[min_lag..max_lag]
        .iter()
        .enumerate()
        .fold((min_lag, f32::NEG_INFINITY), |best, (offset, &value)| {
            if value > best.1 {
                (min_lag + offset, value)
            } else {
                best
            }
        });

    if peak_value > VOICING_THRESHOLD && peak_lag > 0 {
        PitchEstimate {
            pitch_hz: sample_rate as f32 / peak_lag as f32,
            is_voiced: true,
        }
    } else {
        PitchEstimate::UNVOICED
    }
}
