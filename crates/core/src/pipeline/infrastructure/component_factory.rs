use crate::detection::domain::blob_detector::BlobDetector;
use crate::detection::infrastructure::opencv_blob_detector::OpenCvBlobDetector;
use crate::pipeline::tracking_config::TrackingConfig;
use crate::pipeline::update_executor::{SequentialUpdateExecutor, UpdateExecutor};
use crate::tracking::domain::object_tracker::TrackerFactory;
use crate::tracking::infrastructure::opencv_tracker::OpenCvTrackerFactory;

use super::threaded_update_executor::ThreadedUpdateExecutor;

/// Creates the OpenCV blob detector for the configured parameters.
pub fn create_detector(
    config: &TrackingConfig,
) -> Result<Box<dyn BlobDetector>, Box<dyn std::error::Error>> {
    let params = &config.detector;
    log::info!(
        "Blob detector: filter_by_area={} min_area={} filter_by_color={} blob_color={}",
        params.filter_by_area,
        params.min_area,
        params.filter_by_color,
        params.blob_color
    );
    Ok(Box::new(OpenCvBlobDetector::new(params)?))
}

pub fn create_tracker_factory(config: &TrackingConfig) -> Box<dyn TrackerFactory> {
    log::info!(
        "Tracker: {} with {}x{} seed boxes",
        config.algorithm,
        config.box_size,
        config.box_size
    );
    Box::new(OpenCvTrackerFactory::new(config.algorithm))
}

pub fn create_executor(config: &TrackingConfig) -> Box<dyn UpdateExecutor> {
    if config.parallel {
        let executor = ThreadedUpdateExecutor::new();
        log::info!("Updating trackers in parallel");
        Box::new(executor)
    } else {
        Box::new(SequentialUpdateExecutor)
    }
}
