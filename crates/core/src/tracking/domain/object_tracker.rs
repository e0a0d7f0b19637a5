use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// Error type for tracker updates. `Send + Sync` so outcomes can be
/// collected from worker threads.
pub type TrackError = Box<dyn std::error::Error + Send + Sync>;

/// Domain interface for a single-object visual tracker.
///
/// A tracker is seeded once with [`init`](ObjectTracker::init) and then
/// advanced once per frame. `update` returns `Ok(None)` when the target is
/// lost on that frame; the tracker stays usable for later frames.
pub trait ObjectTracker: Send {
    fn init(&mut self, frame: &Frame, bbox: BoundingBox) -> Result<(), TrackError>;

    fn update(&mut self, frame: &Frame) -> Result<Option<BoundingBox>, TrackError>;
}

/// Creates fresh, unseeded trackers of one algorithm.
pub trait TrackerFactory: Send {
    fn create(&self) -> Result<Box<dyn ObjectTracker>, TrackError>;
}
