use std::path::PathBuf;

/// Properties of an opened video source, reported by [`VideoReader::open`].
///
/// `total_frames` comes from the container and may be 0 when the format
/// does not record it; the tracking loop never relies on it for termination.
///
/// [`VideoReader::open`]: crate::video::domain::video_reader::VideoReader::open
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

impl VideoMetadata {
    /// Frames the tracking loop is expected to visit: everything after the
    /// reference frame. `None` when the container did not report a count.
    pub fn tracked_frames(&self) -> Option<usize> {
        if self.total_frames == 0 {
            None
        } else {
            Some(self.total_frames - 1)
        }
    }
}
