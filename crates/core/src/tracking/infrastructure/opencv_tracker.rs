use opencv::core::{self, Ptr, Rect, Rect2d};
use opencv::prelude::*;
use opencv::tracking::{
    legacy_TrackerBoosting, legacy_TrackerMOSSE, legacy_TrackerMedianFlow, legacy_TrackerTLD,
    TrackerCSRT, TrackerCSRT_Params, TrackerKCF, TrackerKCF_Params,
};
use opencv::video::{TrackerMIL, TrackerMIL_Params};

use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;
use crate::shared::mat_conversion::frame_to_mat;
use crate::tracking::domain::object_tracker::{ObjectTracker, TrackError, TrackerFactory};
use crate::tracking::domain::tracker_algorithm::TrackerAlgorithm;

/// The modern API (CSRT, KCF, MIL) works in integer `Rect`s; the legacy API
/// (MOSSE, Boosting, TLD, MedianFlow) keeps sub-pixel `Rect2d`s.
enum TrackerHandle {
    Csrt(Ptr<TrackerCSRT>),
    Kcf(Ptr<TrackerKCF>),
    Mil(Ptr<TrackerMIL>),
    Mosse(Ptr<legacy_TrackerMOSSE>),
    Boosting(Ptr<legacy_TrackerBoosting>),
    Tld(Ptr<legacy_TrackerTLD>),
    MedianFlow(Ptr<legacy_TrackerMedianFlow>),
}

impl TrackerHandle {
    fn create(algorithm: TrackerAlgorithm) -> opencv::Result<Self> {
        Ok(match algorithm {
            TrackerAlgorithm::Csrt => {
                Self::Csrt(TrackerCSRT::create(&TrackerCSRT_Params::default()?)?)
            }
            TrackerAlgorithm::Kcf => Self::Kcf(TrackerKCF::create(TrackerKCF_Params::default()?)?),
            TrackerAlgorithm::Mil => Self::Mil(TrackerMIL::create(TrackerMIL_Params::default()?)?),
            TrackerAlgorithm::Mosse => Self::Mosse(legacy_TrackerMOSSE::create()?),
            TrackerAlgorithm::Boosting => Self::Boosting(legacy_TrackerBoosting::create_def()?),
            TrackerAlgorithm::Tld => Self::Tld(legacy_TrackerTLD::create_def()?),
            TrackerAlgorithm::MedianFlow => {
                Self::MedianFlow(legacy_TrackerMedianFlow::create_def()?)
            }
        })
    }

    fn init(&mut self, image: &Mat, bbox: &BoundingBox) -> opencv::Result<()> {
        let rect = to_rect(bbox);
        let rect2d = to_rect2d(bbox);
        let accepted = match self {
            Self::Csrt(t) => t.init(image, rect).map(|_| true)?,
            Self::Kcf(t) => t.init(image, rect).map(|_| true)?,
            Self::Mil(t) => t.init(image, rect).map(|_| true)?,
            Self::Mosse(t) => t.init(image, rect2d)?,
            Self::Boosting(t) => t.init(image, rect2d)?,
            Self::Tld(t) => t.init(image, rect2d)?,
            Self::MedianFlow(t) => t.init(image, rect2d)?,
        };
        if accepted {
            Ok(())
        } else {
            Err(opencv::Error::new(
                core::StsError,
                "tracker rejected the seed box",
            ))
        }
    }

    fn update(&mut self, image: &Mat, last: &BoundingBox) -> opencv::Result<Option<BoundingBox>> {
        let mut rect = to_rect(last);
        let mut rect2d = to_rect2d(last);
        let (found, legacy) = match self {
            Self::Csrt(t) => (t.update(image, &mut rect)?, false),
            Self::Kcf(t) => (t.update(image, &mut rect)?, false),
            Self::Mil(t) => (t.update(image, &mut rect)?, false),
            Self::Mosse(t) => (t.update(image, &mut rect2d)?, true),
            Self::Boosting(t) => (t.update(image, &mut rect2d)?, true),
            Self::Tld(t) => (t.update(image, &mut rect2d)?, true),
            Self::MedianFlow(t) => (t.update(image, &mut rect2d)?, true),
        };
        if !found {
            return Ok(None);
        }
        Ok(Some(if legacy {
            from_rect2d(rect2d)
        } else {
            from_rect(rect)
        }))
    }
}

/// [`ObjectTracker`] backed by one OpenCV tracker instance.
///
/// CSRT, KCF and MIL round the seed box to whole pixels and report
/// whole-pixel boxes. The legacy algorithms keep sub-pixel coordinates.
pub struct OpenCvTracker {
    handle: TrackerHandle,
    algorithm: TrackerAlgorithm,
    last_box: BoundingBox,
}

// Safety: each OpenCvTracker owns its tracker handle exclusively. The
// threaded executor moves a `&mut` to a single worker per frame, so the
// handle is never accessed from two threads at once.
unsafe impl Send for OpenCvTracker {}

impl OpenCvTracker {
    pub fn new(algorithm: TrackerAlgorithm) -> opencv::Result<Self> {
        Ok(Self {
            handle: TrackerHandle::create(algorithm)?,
            algorithm,
            last_box: BoundingBox::new(0.0, 0.0, 0.0, 0.0),
        })
    }

    pub fn algorithm(&self) -> TrackerAlgorithm {
        self.algorithm
    }
}

impl ObjectTracker for OpenCvTracker {
    fn init(&mut self, frame: &Frame, bbox: BoundingBox) -> Result<(), TrackError> {
        let mat = frame_to_mat(frame)?;
        self.handle.init(&mat, &bbox)?;
        self.last_box = bbox;
        Ok(())
    }

    fn update(&mut self, frame: &Frame) -> Result<Option<BoundingBox>, TrackError> {
        let mat = frame_to_mat(frame)?;
        let found = self.handle.update(&mat, &self.last_box)?;
        if let Some(bbox) = found {
            self.last_box = bbox;
        }
        Ok(found)
    }
}

/// Creates [`OpenCvTracker`]s of a fixed algorithm.
pub struct OpenCvTrackerFactory {
    algorithm: TrackerAlgorithm,
}

impl OpenCvTrackerFactory {
    pub fn new(algorithm: TrackerAlgorithm) -> Self {
        Self { algorithm }
    }
}

impl TrackerFactory for OpenCvTrackerFactory {
    fn create(&self) -> Result<Box<dyn ObjectTracker>, TrackError> {
        Ok(Box::new(OpenCvTracker::new(self.algorithm)?))
    }
}

fn to_rect(bbox: &BoundingBox) -> Rect {
    Rect::new(
        bbox.x.round() as i32,
        bbox.y.round() as i32,
        bbox.width.round() as i32,
        bbox.height.round() as i32,
    )
}

fn from_rect(rect: Rect) -> BoundingBox {
    BoundingBox::new(
        rect.x as f64,
        rect.y as f64,
        rect.width as f64,
        rect.height as f64,
    )
}

fn to_rect2d(bbox: &BoundingBox) -> Rect2d {
    Rect2d::new(bbox.x, bbox.y, bbox.width, bbox.height)
}

fn from_rect2d(rect: Rect2d) -> BoundingBox {
    BoundingBox::new(rect.x, rect.y, rect.width, rect.height)
}
