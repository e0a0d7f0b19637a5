use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;
use crate::tracking::domain::object_tracker::{ObjectTracker, TrackError};

/// Result of one tracker's update on one frame. `Ok(None)` means the
/// target was lost; `Err` means the tracker itself failed on this frame.
pub type UpdateOutcome = Result<Option<BoundingBox>, TrackError>;

/// Abstracts how every tracker is advanced on a frame.
///
/// Implementations may update trackers concurrently, but must return the
/// outcomes in tracker order: `outcomes[i]` belongs to `trackers[i]`.
pub trait UpdateExecutor: Send {
    fn update_all(
        &self,
        trackers: &mut [Box<dyn ObjectTracker>],
        frame: &Frame,
    ) -> Vec<UpdateOutcome>;
}

/// Updates trackers one after another on the calling thread.
pub struct SequentialUpdateExecutor;

impl UpdateExecutor for SequentialUpdateExecutor {
    fn update_all(
        &self,
        trackers: &mut [Box<dyn ObjectTracker>],
        frame: &Frame,
    ) -> Vec<UpdateOutcome> {
        trackers.iter_mut().map(|t| t.update(frame)).collect()
    }
}
