use std::fmt;
use std::str::FromStr;

/// Visual tracker algorithm used for every blob.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrackerAlgorithm {
    /// Minimum output sum of squared error filter. Fastest, least robust.
    Mosse,
    /// Online AdaBoost over Haar-like features.
    Boosting,
    /// Multiple instance learning.
    Mil,
    /// Kernelized correlation filter. Faster, less robust to scale change.
    Kcf,
    /// Tracking, learning and detection. Recovers from occlusion, drifts easily.
    Tld,
    /// Forward-backward optical flow error. Reports failure reliably.
    MedianFlow,
    /// Discriminative correlation filter with channel and spatial reliability.
    #[default]
    Csrt,
}

impl TrackerAlgorithm {
    pub const ALL: [TrackerAlgorithm; 7] = [
        Self::Mosse,
        Self::Boosting,
        Self::Mil,
        Self::Kcf,
        Self::Tld,
        Self::MedianFlow,
        Self::Csrt,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Mosse => "mosse",
            Self::Boosting => "boosting",
            Self::Mil => "mil",
            Self::Kcf => "kcf",
            Self::Tld => "tld",
            Self::MedianFlow => "medianflow",
            Self::Csrt => "csrt",
        }
    }

    /// Whether OpenCV only ships this algorithm through its legacy tracking
    /// API, which works in sub-pixel `Rect2d` boxes.
    pub fn is_legacy(&self) -> bool {
        matches!(
            self,
            Self::Mosse | Self::Boosting | Self::Tld | Self::MedianFlow
        )
    }
}

impl fmt::Display for TrackerAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrackerAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|algo| algo.name() == wanted)
            .ok_or_else(|| {
                format!(
                    "Tracker algorithm must be one of: \
                     mosse, boosting, mil, kcf, tld, medianflow, csrt, got '{s}'"
                )
            })
    }
}
