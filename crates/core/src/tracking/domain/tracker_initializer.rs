use thiserror::Error;

use crate::detection::domain::blob_detector::BlobDetector;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::constants::DEFAULT_BOX_SIZE;
use crate::shared::frame::Frame;
use crate::tracking::domain::object_tracker::{ObjectTracker, TrackerFactory};

#[derive(Error, Debug)]
pub enum InitializeError {
    #[error("blob detection failed: {0}")]
    Detection(String),
    #[error("failed to seed tracker {index}: {reason}")]
    TrackerInit { index: usize, reason: String },
}

/// Builds the fixed tracker set from a reference frame.
///
/// One tracker per detected keypoint, in detection order, each seeded with
/// a `box_size` square centered on its keypoint. Keypoints closer together
/// than the box size produce overlapping trackers; nothing is merged.
pub struct TrackerInitializer {
    box_size: f64,
}

impl TrackerInitializer {
    pub fn new(box_size: f64) -> Self {
        Self { box_size }
    }

    pub fn box_size(&self) -> f64 {
        self.box_size
    }

    pub fn initialize(
        &self,
        frame: &Frame,
        detector: &mut dyn BlobDetector,
        factory: &dyn TrackerFactory,
    ) -> Result<Vec<Box<dyn ObjectTracker>>, InitializeError> {
        let keypoints = detector
            .detect(frame)
            .map_err(|e| InitializeError::Detection(e.to_string()))?;

        log::info!("Number of keypoints detected: {}", keypoints.len());

        let mut trackers = Vec::with_capacity(keypoints.len());
        for (index, keypoint) in keypoints.iter().enumerate() {
            let bbox = BoundingBox::centered_on(keypoint, self.box_size);
            let seed_error = |e: Box<dyn std::error::Error + Send + Sync>| {
                InitializeError::TrackerInit {
                    index,
                    reason: e.to_string(),
                }
            };

            let mut tracker = factory.create().map_err(seed_error)?;
            tracker.init(frame, bbox).map_err(seed_error)?;
            log::debug!(
                "Tracker {index} seeded at ({:.1}, {:.1}) for blob of size {:.1}",
                bbox.x,
                bbox.y,
                keypoint.size
            );
            trackers.push(tracker);
        }
        Ok(trackers)
    }
}

impl Default for TrackerInitializer {
    fn default() -> Self {
        Self::new(DEFAULT_BOX_SIZE)
    }
}
