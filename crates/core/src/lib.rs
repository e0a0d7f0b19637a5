pub mod detection;
pub mod output;
pub mod pipeline;
pub mod shared;
pub mod tracking;
pub mod video;
