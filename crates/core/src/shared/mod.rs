pub mod bounding_box;
pub mod constants;
pub mod frame;
pub mod mat_conversion;
pub mod video_metadata;
