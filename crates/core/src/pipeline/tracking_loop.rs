use std::time::Instant;

use crate::output::domain::record_sink::RecordSink;
use crate::output::domain::track_record::TrackRecord;
use crate::pipeline::error::TrackBlobsError;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::update_executor::UpdateExecutor;
use crate::shared::frame::Frame;
use crate::tracking::domain::object_tracker::ObjectTracker;

/// Counters for a finished tracking loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub trackers: usize,
    /// Frames visited after the reference frame.
    pub frames: usize,
    pub records: usize,
    pub failures: usize,
}

/// Drives every tracker through the frames that follow the reference frame.
///
/// Frames are numbered from 1. For each frame all trackers are updated and
/// every success becomes one record, written in tracker order. A lost or
/// erroring tracker writes nothing and stays in the set.
pub struct TrackingLoop<'a> {
    executor: &'a dyn UpdateExecutor,
    logger: &'a mut dyn PipelineLogger,
    expected_frames: usize,
}

impl<'a> TrackingLoop<'a> {
    pub fn new(executor: &'a dyn UpdateExecutor, logger: &'a mut dyn PipelineLogger) -> Self {
        Self {
            executor,
            logger,
            expected_frames: 0,
        }
    }

    /// Total used for progress reporting. 0 means unknown.
    pub fn with_expected_frames(mut self, expected_frames: usize) -> Self {
        self.expected_frames = expected_frames;
        self
    }

    /// Runs until `frames` is exhausted or yields a decode error.
    ///
    /// Only a failing sink aborts the loop.
    pub fn run<I>(
        &mut self,
        frames: I,
        trackers: &mut [Box<dyn ObjectTracker>],
        sink: &mut dyn RecordSink,
    ) -> Result<LoopStats, TrackBlobsError>
    where
        I: Iterator<Item = Result<Frame, Box<dyn std::error::Error>>>,
    {
        let mut stats = LoopStats {
            trackers: trackers.len(),
            ..LoopStats::default()
        };

        for next in frames {
            let frame = match next {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!(
                        "Stopping after frame {}: could not decode next frame: {e}",
                        stats.frames
                    );
                    break;
                }
            };
            let frame_index = stats.frames + 1;

            let t0 = Instant::now();
            let outcomes = self.executor.update_all(trackers, &frame);
            self.logger.timing("update", elapsed_ms(t0));

            let t0 = Instant::now();
            for (tracker_index, outcome) in outcomes.into_iter().enumerate() {
                match outcome {
                    Ok(Some(bbox)) => {
                        sink.write(&TrackRecord::from_box(frame_index, &bbox))
                            .map_err(|e| TrackBlobsError::Output(e.to_string()))?;
                        stats.records += 1;
                        self.logger.tracker_update(frame_index, tracker_index, true);
                    }
                    Ok(None) => {
                        stats.failures += 1;
                        self.logger.tracker_update(frame_index, tracker_index, false);
                    }
                    Err(e) => {
                        log::warn!("Tracker {tracker_index} errored on frame {frame_index}: {e}");
                        stats.failures += 1;
                        self.logger.tracker_update(frame_index, tracker_index, false);
                    }
                }
            }
            self.logger.timing("write", elapsed_ms(t0));

            stats.frames = frame_index;
            self.logger.progress(frame_index, self.expected_frames);
        }

        Ok(stats)
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::infrastructure::threaded_update_executor::ThreadedUpdateExecutor;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::pipeline::update_executor::SequentialUpdateExecutor;
    use crate::shared::bounding_box::BoundingBox;
    use crate::tracking::domain::object_tracker::TrackError;
    use std::collections::HashMap;
    use std::path::Path;

    // --- Stubs ---

    /// Answers each frame from a script keyed by the frame's decode index.
    /// Frames missing from the script are reported as lost.
    struct ScriptedTracker {
        script: HashMap<usize, (f64, f64)>,
        erroring: Vec<usize>,
    }

    impl ScriptedTracker {
        fn new(script: &[(usize, (f64, f64))]) -> Self {
            Self {
                script: script.iter().copied().collect(),
                erroring: Vec::new(),
            }
        }

        fn erroring_on(mut self, indices: &[usize]) -> Self {
            self.erroring = indices.to_vec();
            self
        }
    }

    impl ObjectTracker for ScriptedTracker {
        fn init(&mut self, _frame: &Frame, _bbox: BoundingBox) -> Result<(), TrackError> {
            Ok(())
        }

        fn update(&mut self, frame: &Frame) -> Result<Option<BoundingBox>, TrackError> {
            if self.erroring.contains(&frame.index()) {
                return Err("update blew up".into());
            }
            Ok(self
                .script
                .get(&frame.index())
                .map(|&(x, y)| BoundingBox::new(x, y, 60.0, 60.0)))
        }
    }

    #[derive(Default)]
    struct MemorySink {
        records: Vec<TrackRecord>,
        fail_after: Option<usize>,
    }

    impl RecordSink for MemorySink {
        fn open(&mut self, _path: &Path) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }

        fn write(&mut self, record: &TrackRecord) -> Result<(), Box<dyn std::error::Error>> {
            if self.fail_after == Some(self.records.len()) {
                return Err("disk full".into());
            }
            self.records.push(*record);
            Ok(())
        }

        fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        updates: Vec<(usize, usize, bool)>,
        progress: Vec<(usize, usize)>,
        stages: Vec<String>,
    }

    impl PipelineLogger for RecordingLogger {
        fn progress(&mut self, current: usize, total: usize) {
            self.progress.push((current, total));
        }
        fn tracker_update(&mut self, frame_index: usize, tracker_index: usize, succeeded: bool) {
            self.updates.push((frame_index, tracker_index, succeeded));
        }
        fn timing(&mut self, stage: &str, _duration_ms: f64) {
            self.stages.push(stage.to_string());
        }
        fn info(&mut self, _message: &str) {}
    }

    // --- Helpers ---

    /// Frames after the reference frame: decode indices 1..=count.
    fn frames(count: usize) -> impl Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> {
        (1..=count).map(|i| Ok(Frame::filled(8, 8, 0, i)))
    }

    fn trackers(list: Vec<ScriptedTracker>) -> Vec<Box<dyn ObjectTracker>> {
        list.into_iter()
            .map(|t| Box::new(t) as Box<dyn ObjectTracker>)
            .collect()
    }

    fn rows(sink: &MemorySink) -> Vec<(usize, f64, f64)> {
        sink.records
            .iter()
            .map(|r| (r.frame_index, r.x, r.y))
            .collect()
    }

    // --- Tests ---

    #[test]
    fn test_two_blobs_one_lost_on_second_frame() {
        let mut trackers = trackers(vec![
            ScriptedTracker::new(&[(1, (71.0, 70.0)), (2, (72.0, 70.0))]),
            ScriptedTracker::new(&[(1, (170.0, 121.0))]),
        ]);
        let mut sink = MemorySink::default();
        let mut logger = NullPipelineLogger;

        let stats = TrackingLoop::new(&SequentialUpdateExecutor, &mut logger)
            .run(frames(2), &mut trackers, &mut sink)
            .unwrap();

        assert_eq!(
            rows(&sink),
            vec![
                (1, 71.0, 70.0),
                (1, 170.0, 121.0),
                (2, 72.0, 70.0),
            ]
        );
        assert_eq!(
            stats,
            LoopStats {
                trackers: 2,
                frames: 2,
                records: 3,
                failures: 1,
            }
        );
    }

    #[test]
    fn test_no_trackers_still_consumes_every_frame() {
        let mut sink = MemorySink::default();
        let mut logger = RecordingLogger::default();

        let stats = TrackingLoop::new(&SequentialUpdateExecutor, &mut logger)
            .with_expected_frames(4)
            .run(frames(4), &mut [], &mut sink)
            .unwrap();

        assert!(sink.records.is_empty());
        assert_eq!(stats.frames, 4);
        assert_eq!(logger.progress, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
    }

    #[test]
    fn test_always_failing_tracker_writes_nothing_but_is_kept() {
        let mut trackers = trackers(vec![ScriptedTracker::new(&[])]);
        let mut sink = MemorySink::default();
        let mut logger = RecordingLogger::default();

        let stats = TrackingLoop::new(&SequentialUpdateExecutor, &mut logger)
            .run(frames(5), &mut trackers, &mut sink)
            .unwrap();

        assert!(sink.records.is_empty());
        assert_eq!(stats.failures, 5);
        assert_eq!(logger.updates.len(), 5);
        assert!(logger.updates.iter().all(|&(_, _, ok)| !ok));
    }

    #[test]
    fn test_lost_tracker_can_report_again_later() {
        let mut trackers = trackers(vec![ScriptedTracker::new(&[
            (1, (10.0, 10.0)),
            (4, (14.0, 10.0)),
        ])]);
        let mut sink = MemorySink::default();
        let mut logger = NullPipelineLogger;

        TrackingLoop::new(&SequentialUpdateExecutor, &mut logger)
            .run(frames(4), &mut trackers, &mut sink)
            .unwrap();

        assert_eq!(rows(&sink), vec![(1, 10.0, 10.0), (4, 14.0, 10.0)]);
    }

    #[test]
    fn test_update_error_is_treated_as_failure() {
        let mut trackers = trackers(vec![
            ScriptedTracker::new(&[(1, (1.0, 1.0)), (2, (2.0, 2.0))]).erroring_on(&[1]),
            ScriptedTracker::new(&[(1, (5.0, 5.0)), (2, (6.0, 6.0))]),
        ]);
        let mut sink = MemorySink::default();
        let mut logger = NullPipelineLogger;

        let stats = TrackingLoop::new(&SequentialUpdateExecutor, &mut logger)
            .run(frames(2), &mut trackers, &mut sink)
            .unwrap();

        assert_eq!(
            rows(&sink),
            vec![(1, 5.0, 5.0), (2, 2.0, 2.0), (2, 6.0, 6.0)]
        );
        assert_eq!(stats.failures, 1);
    }

    #[test]
    fn test_decode_error_ends_loop_without_failing() {
        let mut trackers = trackers(vec![ScriptedTracker::new(&[
            (1, (1.0, 1.0)),
            (2, (2.0, 2.0)),
            (3, (3.0, 3.0)),
        ])]);
        let source: Vec<Result<Frame, Box<dyn std::error::Error>>> = vec![
            Ok(Frame::filled(8, 8, 0, 1)),
            Err("corrupt packet".into()),
            Ok(Frame::filled(8, 8, 0, 3)),
        ];
        let mut sink = MemorySink::default();
        let mut logger = NullPipelineLogger;

        let stats = TrackingLoop::new(&SequentialUpdateExecutor, &mut logger)
            .run(source.into_iter(), &mut trackers, &mut sink)
            .unwrap();

        assert_eq!(stats.frames, 1);
        assert_eq!(rows(&sink), vec![(1, 1.0, 1.0)]);
    }

    #[test]
    fn test_sink_failure_aborts_run() {
        let mut trackers = trackers(vec![ScriptedTracker::new(&[
            (1, (1.0, 1.0)),
            (2, (2.0, 2.0)),
        ])]);
        let mut sink = MemorySink {
            fail_after: Some(1),
            ..MemorySink::default()
        };
        let mut logger = NullPipelineLogger;

        let err = TrackingLoop::new(&SequentialUpdateExecutor, &mut logger)
            .run(frames(2), &mut trackers, &mut sink)
            .unwrap_err();

        assert!(matches!(err, TrackBlobsError::Output(ref msg) if msg.contains("disk full")));
        assert_eq!(sink.records.len(), 1);
    }

    #[test]
    fn test_frame_indices_never_decrease() {
        let script: Vec<_> = (1..=6).map(|i| (i, (i as f64, 0.0))).collect();
        let mut trackers = trackers(vec![
            ScriptedTracker::new(&script),
            ScriptedTracker::new(&script[..3]),
            ScriptedTracker::new(&script[2..]),
        ]);
        let mut sink = MemorySink::default();
        let mut logger = NullPipelineLogger;

        TrackingLoop::new(&SequentialUpdateExecutor, &mut logger)
            .run(frames(6), &mut trackers, &mut sink)
            .unwrap();

        let indices: Vec<usize> = sink.records.iter().map(|r| r.frame_index).collect();
        assert!(indices.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(indices.first(), Some(&1));
        assert_eq!(indices.last(), Some(&6));
    }

    #[test]
    fn test_logger_sees_each_stage_per_frame() {
        let mut trackers = trackers(vec![ScriptedTracker::new(&[(1, (0.0, 0.0))])]);
        let mut sink = MemorySink::default();
        let mut logger = RecordingLogger::default();

        TrackingLoop::new(&SequentialUpdateExecutor, &mut logger)
            .run(frames(2), &mut trackers, &mut sink)
            .unwrap();

        assert_eq!(logger.stages, vec!["update", "write", "update", "write"]);
        assert_eq!(logger.updates, vec![(1, 0, true), (2, 0, false)]);
        assert_eq!(logger.progress, vec![(1, 0), (2, 0)]);
    }

    #[test]
    fn test_threaded_executor_writes_same_rows_as_sequential() {
        let build = || {
            trackers(
                (0..7)
                    .map(|t| {
                        let script: Vec<_> = (1..=5)
                            .filter(|f| (f + t) % 3 != 0)
                            .map(|f| (f, (t as f64 * 10.0, f as f64)))
                            .collect();
                        ScriptedTracker::new(&script)
                    })
                    .collect(),
            )
        };

        let mut sequential_sink = MemorySink::default();
        TrackingLoop::new(&SequentialUpdateExecutor, &mut NullPipelineLogger)
            .run(frames(5), &mut build(), &mut sequential_sink)
            .unwrap();

        let mut threaded_sink = MemorySink::default();
        TrackingLoop::new(&ThreadedUpdateExecutor::with_workers(3), &mut NullPipelineLogger)
            .run(frames(5), &mut build(), &mut threaded_sink)
            .unwrap();

        assert_eq!(rows(&sequential_sink), rows(&threaded_sink));
        assert!(!sequential_sink.records.is_empty());
    }
}
