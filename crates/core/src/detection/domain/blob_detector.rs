use crate::detection::domain::keypoint::Keypoint;
use crate::shared::constants::{DEFAULT_BLOB_COLOR, DEFAULT_MIN_AREA};
use crate::shared::frame::Frame;

/// Domain interface for blob detection.
///
/// Keypoints are returned in the detector's own order; callers must not
/// reorder them since tracker order is derived from it.
pub trait BlobDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Keypoint>, Box<dyn std::error::Error>>;
}

/// Detector options exposed to configuration.
///
/// Anything not listed here stays at the collaborator's default. Values are
/// passed through without range checks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlobDetectorParams {
    pub filter_by_area: bool,
    pub min_area: f32,
    pub filter_by_color: bool,
    pub blob_color: u8,
}

impl Default for BlobDetectorParams {
    fn default() -> Self {
        Self {
            filter_by_area: true,
            min_area: DEFAULT_MIN_AREA,
            filter_by_color: true,
            blob_color: DEFAULT_BLOB_COLOR,
        }
    }
}
