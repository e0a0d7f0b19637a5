use crate::detection::domain::blob_detector::BlobDetectorParams;
use crate::shared::constants::DEFAULT_BOX_SIZE;
use crate::tracking::domain::tracker_algorithm::TrackerAlgorithm;
use crate::tracking::domain::tracker_initializer::TrackerInitializer;

/// Everything that selects how blobs are found and followed.
///
/// Resolved once at startup, before the reference frame is read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackingConfig {
    pub algorithm: TrackerAlgorithm,
    pub box_size: f64,
    pub detector: BlobDetectorParams,
    /// Update trackers concurrently within each frame.
    pub parallel: bool,
}

impl TrackingConfig {
    pub fn initializer(&self) -> TrackerInitializer {
        TrackerInitializer::new(self.box_size)
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            algorithm: TrackerAlgorithm::default(),
            box_size: DEFAULT_BOX_SIZE,
            detector: BlobDetectorParams::default(),
            parallel: false,
        }
    }
}
