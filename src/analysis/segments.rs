// Segments - post-classification views over a labelled signal
//
// Groups the source audio by frame label, summarises the label sequence, and
// picks representative frames for single-frame diagnostics.

use crate::analysis::classifier::VoicingClass;
use crate::analysis::framing::FrameLayout;

/// Default number of example frames picked for diagnostics
pub const DEFAULT_EXAMPLE_LIMIT: usize = 5;

/// Source audio concatenated per class
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassSegments {
    pub silent: Vec<f32>,
    pub unvoiced: Vec<f32>,
    pub voiced: Vec<f32>,
}

impl ClassSegments {
    /// Samples collected for `class`
    pub fn get(&self, class: VoicingClass) -> &[f32] {
        match class {
            VoicingClass::Silent => &self.silent,
            VoicingClass::Unvoiced => &self.unvoiced,
            VoicingClass::Voiced => &self.voiced,
        }
    }

    fn get_mut(&mut self, class: VoicingClass) -> &mut Vec<f32> {
        match class {
            VoicingClass::Silent => &mut self.silent,
            VoicingClass::Unvoiced => &mut self.unvoiced,
            VoicingClass::Voiced => &mut self.voiced,
        }
    }
}

/// Concatenate each frame's source samples onto the buffer of its label
///
/// Frames overlap, so overlapping regions appear once per frame that covers
/// them. Zero padding is not included; only samples present in `signal` are
/// copied.
pub fn split_by_class(
    signal: &[f32],
    layout: FrameLayout,
    labels: &[VoicingClass],
) -> ClassSegments {
    let mut segments = ClassSegments::default();

    for (index, &label) in labels.iter().enumerate() {
        let range = layout.source_range(index, signal.len());
        segments.get_mut(label).extend_from_slice(&signal[range]);
    }

    segments
}

/// Per-class frame counts for a label sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClassificationSummary {
    pub total_frames: usize,
    pub silent_frames: usize,
    pub unvoiced_frames: usize,
    pub voiced_frames: usize,
}

impl ClassificationSummary {
    /// Count labels by class
    pub fn from_labels(labels: &[VoicingClass]) -> Self {
        labels.iter().fold(
            Self {
                total_frames: labels.len(),
                ..Self::default()
            },
            |mut summary, label| {
                match label {
                    VoicingClass::Silent => summary.silent_frames += 1,
                    VoicingClass::Unvoiced => summary.unvoiced_frames += 1,
                    VoicingClass::Voiced => summary.voiced_frames += 1,
                }
                summary
            },
        )
    }

    /// Number of frames labelled `class`
    pub fn count(&self, class: VoicingClass) -> usize {
        match class {
            VoicingClass::Silent => self.silent_frames,
            VoicingClass::Unvoiced => self.unvoiced_frames,
            VoicingClass::Voiced => self.voiced_frames,
        }
    }

    /// Share of frames labelled `class`, in percent (0.0 with no frames)
    pub fn percentage(&self, class: VoicingClass) -> f32 {
        if self.total_frames == 0 {
            return 0.0;
        }
        self.count(class) as f32 * 100.0 / self.total_frames as f32
    }

    /// Class with the most frames (ties go to the higher label)
    pub fn dominant(&self) -> Option<VoicingClass> {
        if self.total_frames == 0 {
            return None;
        }
        VoicingClass::ALL
            .iter()
            .copied()
            .max_by_key(|&class| self.count(class))
    }
}

/// Pick representative frame indices for diagnostics
///
/// Voiced frames first (first, middle and last, or all of them when there
/// are fewer than three), then unvoiced frames (first and last, or all of
/// them when there are fewer than two), truncated to `limit`.
pub fn select_example_frames(labels: &[VoicingClass], limit: usize) -> Vec<usize> {
    let indices_of = |class: VoicingClass| -> Vec<usize> {
        labels
            .iter()
            .enumerate()
            .filter(|(_, &label)| label == class)
            .map(|(i, _)| i)
            .collect()
    };

    let voiced = indices_of(VoicingClass::Voiced);
    let unvoiced = indices_of(VoicingClass::Unvoiced);

    let mut examples = Vec::new();
    if voiced.len() >= 3 {
        examples.extend([voiced[0], voiced[voiced.len() / 2], voiced[voiced.len() - 1]]);
    } else {
        examples.extend(&voiced);
    }

    if unvoiced.len() >= 2 {
        examples.extend([unvoiced[0], unvoiced[unvoiced.len() - 1]]);
    } else {
        examples.extend(&unvoiced);
    }

    examples.truncate(limit);
    examples
}
