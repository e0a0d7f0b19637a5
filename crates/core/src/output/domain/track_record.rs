use serde::Serialize;

use crate::shared::bounding_box::BoundingBox;

/// One successful tracker update: `frame_index,x,y`.
///
/// `frame_index` is 1-based and counts frames after the reference frame.
/// Only the box origin is kept; width and height are not persisted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrackRecord {
    pub frame_index: usize,
    pub x: f64,
    pub y: f64,
}

impl TrackRecord {
    pub fn new(frame_index: usize, x: f64, y: f64) -> Self {
        Self { frame_index, x, y }
    }

    pub fn from_box(frame_index: usize, bbox: &BoundingBox) -> Self {
        Self::new(frame_index, bbox.x, bbox.y)
    }
}
