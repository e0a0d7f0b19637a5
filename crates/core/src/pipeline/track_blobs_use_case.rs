use std::path::Path;

use crate::detection::domain::blob_detector::BlobDetector;
use crate::output::domain::record_sink::RecordSink;
use crate::shared::video_metadata::VideoMetadata;
use crate::tracking::domain::object_tracker::TrackerFactory;
use crate::tracking::domain::tracker_initializer::TrackerInitializer;
use crate::video::domain::video_reader::VideoReader;

use super::error::TrackBlobsError;
use super::pipeline_logger::PipelineLogger;
use super::tracking_loop::{LoopStats, TrackingLoop};
use super::update_executor::UpdateExecutor;

/// Detects blobs on the first frame of a video and tracks them through the rest.
///
/// This is a single-use struct: `execute` consumes the reader, detector and
/// sink, so a second call returns [`TrackBlobsError::AlreadyExecuted`].
pub struct TrackBlobsUseCase {
    reader: Option<Box<dyn VideoReader>>,
    detector: Option<Box<dyn BlobDetector>>,
    sink: Option<Box<dyn RecordSink>>,
    factory: Box<dyn TrackerFactory>,
    executor: Box<dyn UpdateExecutor>,
    logger: Box<dyn PipelineLogger>,
    initializer: TrackerInitializer,
}

impl TrackBlobsUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        detector: Box<dyn BlobDetector>,
        factory: Box<dyn TrackerFactory>,
        sink: Box<dyn RecordSink>,
        executor: Box<dyn UpdateExecutor>,
        logger: Box<dyn PipelineLogger>,
        initializer: TrackerInitializer,
    ) -> Self {
        Self {
            reader: Some(reader),
            detector: Some(detector),
            sink: Some(sink),
            factory,
            executor,
            logger,
            initializer,
        }
    }

    /// Tracks every blob of `input_path` and writes `frame_index,x,y` rows to
    /// `output_path`.
    ///
    /// The output is only created once the reference frame has been decoded,
    /// so an unreadable source leaves nothing behind.
    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<LoopStats, TrackBlobsError> {
        let mut reader = self.reader.take().ok_or(TrackBlobsError::AlreadyExecuted)?;
        let mut detector = self.detector.take().ok_or(TrackBlobsError::AlreadyExecuted)?;
        let mut sink = self.sink.take().ok_or(TrackBlobsError::AlreadyExecuted)?;

        let metadata = reader
            .open(input_path)
            .map_err(|e| source_unavailable(input_path, e.to_string()))?;
        self.logger.info(&format!(
            "Opened {} ({}x{} {}, {:.2} fps, {} frames)",
            input_path.display(),
            metadata.width,
            metadata.height,
            metadata.codec,
            metadata.fps,
            metadata.total_frames
        ));

        let result = self.track(
            reader.as_mut(),
            detector.as_mut(),
            sink.as_mut(),
            &metadata,
            input_path,
            output_path,
        );
        reader.close();

        let stats = result?;
        self.logger.info(&format!(
            "Wrote {} records for {} trackers over {} frames to {}",
            stats.records,
            stats.trackers,
            stats.frames,
            output_path.display()
        ));
        self.logger.summary();
        Ok(stats)
    }

    fn track(
        &mut self,
        reader: &mut dyn VideoReader,
        detector: &mut dyn BlobDetector,
        sink: &mut dyn RecordSink,
        metadata: &VideoMetadata,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<LoopStats, TrackBlobsError> {
        let mut frames = reader.frames();

        let reference = match frames.next() {
            Some(Ok(frame)) => frame,
            Some(Err(e)) => return Err(source_unavailable(input_path, e.to_string())),
            None => {
                return Err(source_unavailable(
                    input_path,
                    "video contains no frames".into(),
                ))
            }
        };

        let mut trackers =
            self.initializer
                .initialize(&reference, detector, self.factory.as_ref())?;
        drop(reference);
        self.logger
            .info(&format!("Initialized {} trackers", trackers.len()));

        sink.open(output_path)
            .map_err(|e| TrackBlobsError::Output(e.to_string()))?;

        let expected = metadata.tracked_frames().unwrap_or(0);
        let looped = TrackingLoop::new(self.executor.as_ref(), self.logger.as_mut())
            .with_expected_frames(expected)
            .run(frames, &mut trackers, sink);
        let closed = sink
            .close()
            .map_err(|e| TrackBlobsError::Output(e.to_string()));

        let stats = looped?;
        closed?;
        Ok(stats)
    }
}

fn source_unavailable(path: &Path, reason: String) -> TrackBlobsError {
    TrackBlobsError::SourceUnavailable {
        path: path.to_path_buf(),
        reason,
    }
}
