use std::fs::File;
use std::path::Path;

use crate::output::domain::record_sink::RecordSink;
use crate::output::domain::track_record::TrackRecord;

/// Writes records as headerless CSV rows: `frame_index,x,y`.
pub struct CsvRecordSink {
    writer: Option<csv::Writer<File>>,
    rows: usize,
}

impl CsvRecordSink {
    pub fn new() -> Self {
        Self {
            writer: None,
            rows: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
}

impl Default for CsvRecordSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSink for CsvRecordSink {
    fn open(&mut self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        self.writer = Some(writer);
        self.rows = 0;
        Ok(())
    }

    fn write(&mut self, record: &TrackRecord) -> Result<(), Box<dyn std::error::Error>> {
        let writer = self.writer.as_mut().ok_or("CsvRecordSink: not opened")?;
        writer.serialize(record)?;
        self.rows += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }
}
