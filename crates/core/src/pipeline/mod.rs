pub mod error;
pub mod infrastructure;
pub mod pipeline_logger;
pub mod track_blobs_use_case;
pub mod tracking_config;
pub mod tracking_loop;
pub mod update_executor;
