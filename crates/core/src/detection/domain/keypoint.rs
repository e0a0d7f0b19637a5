/// A detected blob reduced to its center point.
///
/// `size` is the blob diameter reported by the detector. It is kept for
/// logging only; seeding always uses the configured box size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keypoint {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl Keypoint {
    pub fn new(x: f64, y: f64, size: f64) -> Self {
        Self { x, y, size }
    }
}
