/// Side length in pixels of the square seeded around each keypoint.
pub const DEFAULT_BOX_SIZE: f64 = 60.0;

pub const DEFAULT_OUTPUT_FILE: &str = "output.csv";

/// Blob detector defaults: bright blobs of at least 20 px².
pub const DEFAULT_MIN_AREA: f32 = 20.0;
pub const DEFAULT_BLOB_COLOR: u8 = 255;

/// Progress is logged every this many frames.
pub const PROGRESS_THROTTLE_FRAMES: usize = 30;
