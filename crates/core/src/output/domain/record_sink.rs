use std::path::Path;

use crate::output::domain::track_record::TrackRecord;

/// Destination for track records.
///
/// `open` is deferred until the source has produced its reference frame, so
/// a failing source never leaves an output file behind.
pub trait RecordSink: Send {
    fn open(&mut self, path: &Path) -> Result<(), Box<dyn std::error::Error>>;

    /// Appends one record. Records arrive in final output order.
    fn write(&mut self, record: &TrackRecord) -> Result<(), Box<dyn std::error::Error>>;

    /// Flushes buffered records and releases the destination.
    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}
