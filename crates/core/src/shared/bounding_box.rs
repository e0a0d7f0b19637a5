use crate::detection::domain::keypoint::Keypoint;

/// Axis-aligned rectangle in frame pixel coordinates.
///
/// `x`/`y` are the top-left corner. Coordinates stay floating point so that
/// whatever the tracker reports is written out unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `size` whose center is the keypoint.
    ///
    /// The origin may be negative for keypoints near the frame border; it is
    /// handed to the tracker as-is.
    pub fn centered_on(keypoint: &Keypoint, size: f64) -> Self {
        let half = size / 2.0;
        Self::new(keypoint.x - half, keypoint.y - half, size, size)
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}
