use std::path::PathBuf;

use thiserror::Error;

use crate::tracking::domain::tracker_initializer::InitializeError;

/// Fatal outcomes of a tracking run.
///
/// Individual tracker failures never surface here; they only mean that a
/// row is missing from the output.
#[derive(Error, Debug)]
pub enum TrackBlobsError {
    #[error("cannot read video {}: {reason}", path.display())]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error(transparent)]
    Initialize(#[from] InitializeError),

    #[error("failed to write tracking records: {0}")]
    Output(String),

    #[error("tracking run has already been executed")]
    AlreadyExecuted,
}
