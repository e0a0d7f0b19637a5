use opencv::core::{self, KeyPoint, Ptr, Vector};
use opencv::features2d::{SimpleBlobDetector, SimpleBlobDetector_Params};
use opencv::prelude::*;

use crate::detection::domain::blob_detector::{BlobDetector, BlobDetectorParams};
use crate::detection::domain::keypoint::Keypoint;
use crate::shared::frame::Frame;
use crate::shared::mat_conversion::frame_to_mat;

/// Blob detection backed by OpenCV's `SimpleBlobDetector`.
///
/// Only the options in [`BlobDetectorParams`] are overridden; thresholds,
/// circularity, convexity and inertia filters keep OpenCV's defaults.
pub struct OpenCvBlobDetector {
    detector: Ptr<SimpleBlobDetector>,
}

// Safety: OpenCvBlobDetector is only used from a single thread at a time.
// The detector handle is never shared or cloned across threads.
unsafe impl Send for OpenCvBlobDetector {}

impl OpenCvBlobDetector {
    pub fn new(params: &BlobDetectorParams) -> opencv::Result<Self> {
        let mut cv_params = SimpleBlobDetector_Params::default()?;
        cv_params.filter_by_area = params.filter_by_area;
        cv_params.min_area = params.min_area;
        cv_params.filter_by_color = params.filter_by_color;
        cv_params.blob_color = params.blob_color;

        let detector = SimpleBlobDetector::create(cv_params)?;
        Ok(Self { detector })
    }
}

impl BlobDetector for OpenCvBlobDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Keypoint>, Box<dyn std::error::Error>> {
        let mat = frame_to_mat(frame)?;
        let mut found = Vector::<KeyPoint>::new();
        self.detector.detect(&mat, &mut found, &core::no_array())?;

        let keypoints: Vec<Keypoint> = found
            .iter()
            .map(|kp| {
                let pt = kp.pt();
                Keypoint::new(pt.x as f64, pt.y as f64, kp.size() as f64)
            })
            .collect();
        log::debug!(
            "Detected {} blobs in frame {}",
            keypoints.len(),
            frame.index()
        );
        Ok(keypoints)
    }
}
