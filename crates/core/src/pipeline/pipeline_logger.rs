use std::collections::BTreeMap;
use std::time::Instant;

use crate::shared::constants::PROGRESS_THROTTLE_FRAMES;

/// Observer for tracking-run events.
///
/// Keeps the use case and the tracking loop independent of where progress
/// and diagnostics end up (log output, tests).
pub trait PipelineLogger: Send {
    /// Report frame-level progress. `total` is 0 when the source length is unknown.
    fn progress(&mut self, current: usize, total: usize);

    /// Record the outcome of one tracker on one frame.
    fn tracker_update(&mut self, frame_index: usize, tracker_index: usize, succeeded: bool);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn tracker_update(&mut self, _frame_index: usize, _tracker_index: usize, _succeeded: bool) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrackerTally {
    pub succeeded: usize,
    pub failed: usize,
    /// Longest run of consecutive failed frames.
    pub longest_loss: usize,
    current_loss: usize,
}

impl TrackerTally {
    fn record(&mut self, succeeded: bool) {
        if succeeded {
            self.succeeded += 1;
            self.current_loss = 0;
        } else {
            self.failed += 1;
            self.current_loss += 1;
            self.longest_loss = self.longest_loss.max(self.current_loss);
        }
    }
}

/// Log-backed logger for the CLI.
///
/// Progress lines are throttled to every `throttle_frames` frames. Tracker
/// outcomes are tallied per tracker so the summary shows which blobs were
/// lost and for how long.
pub struct StdoutPipelineLogger {
    throttle_frames: usize,
    tallies: BTreeMap<usize, TrackerTally>,
    timings: BTreeMap<String, Vec<f64>>,
    start_time: Instant,
    frames_seen: usize,
}

impl StdoutPipelineLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            tallies: BTreeMap::new(),
            timings: BTreeMap::new(),
            start_time: Instant::now(),
            frames_seen: 0,
        }
    }

    pub fn tally(&self, tracker_index: usize) -> Option<&TrackerTally> {
        self.tallies.get(&tracker_index)
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    /// Returns the formatted summary, or `None` if no frame was processed.
    pub fn summary_string(&self) -> Option<String> {
        if self.frames_seen == 0 {
            return None;
        }

        let elapsed_s = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Tracking summary ({} frames, {} trackers, {elapsed_s:.1}s):",
            self.frames_seen,
            self.tallies.len()
        )];

        for (index, tally) in &self.tallies {
            lines.push(format!(
                "  tracker {index:3}: {} ok, {} failed (longest loss {} frames)",
                tally.succeeded, tally.failed, tally.longest_loss
            ));
        }

        for (stage, durations) in &self.timings {
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = total_ms / durations.len().max(1) as f64;
            lines.push(format!(
                "  {stage:8}: avg {avg_ms:6.1}ms  total {total_ms:7.0}ms"
            ));
        }

        if elapsed_s > 0.0 {
            let fps = self.frames_seen as f64 / elapsed_s;
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(PROGRESS_THROTTLE_FRAMES)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.frames_seen = self.frames_seen.max(current);
        if current % self.throttle_frames != 0 && current != total {
            return;
        }
        if total > 0 {
            let pct = current as f64 / total as f64 * 100.0;
            log::info!("Tracking: {current}/{total} frames ({pct:.1}%)");
        } else {
            log::info!("Tracking: {current} frames");
        }
    }

    fn tracker_update(&mut self, frame_index: usize, tracker_index: usize, succeeded: bool) {
        log::debug!("{}", update_line(frame_index, tracker_index, succeeded));
        self.tallies
            .entry(tracker_index)
            .or_default()
            .record(succeeded);
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

fn update_line(frame_index: usize, tracker_index: usize, succeeded: bool) -> String {
    let outcome = if succeeded { "success" } else { "failed" };
    format!("Tracker {tracker_index} update {outcome} for frame {frame_index}")
}
