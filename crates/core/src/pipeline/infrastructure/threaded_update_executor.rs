use std::num::NonZeroUsize;

use crate::pipeline::update_executor::{UpdateExecutor, UpdateOutcome};
use crate::shared::frame::Frame;
use crate::tracking::domain::object_tracker::ObjectTracker;

/// Updates trackers concurrently on scoped worker threads.
///
/// Trackers are split into contiguous chunks, one per worker. Workers send
/// `(tracker_index, outcome)` back over a channel and the outcomes are put
/// back in tracker order before returning, so output order matches the
/// sequential executor exactly.
pub struct ThreadedUpdateExecutor {
    max_workers: usize,
}

impl ThreadedUpdateExecutor {
    pub fn new() -> Self {
        let workers = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self::with_workers(workers)
    }

    pub fn with_workers(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
        }
    }
}

impl Default for ThreadedUpdateExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateExecutor for ThreadedUpdateExecutor {
    fn update_all(
        &self,
        trackers: &mut [Box<dyn ObjectTracker>],
        frame: &Frame,
    ) -> Vec<UpdateOutcome> {
        let count = trackers.len();
        if count == 0 {
            return Vec::new();
        }
        let chunk_size = count.div_ceil(self.max_workers);
        // capacity `count` so workers never block on send
        let (outcome_tx, outcome_rx) = crossbeam_channel::bounded::<(usize, UpdateOutcome)>(count);

        std::thread::scope(|scope| {
            for (chunk_index, chunk) in trackers.chunks_mut(chunk_size).enumerate() {
                let outcome_tx = outcome_tx.clone();
                let first = chunk_index * chunk_size;
                scope.spawn(move || {
                    for (offset, tracker) in chunk.iter_mut().enumerate() {
                        let outcome = tracker.update(frame);
                        if outcome_tx.send((first + offset, outcome)).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(outcome_tx);

        let mut slots: Vec<Option<UpdateOutcome>> = (0..count).map(|_| None).collect();
        for (index, outcome) in outcome_rx {
            slots[index] = Some(outcome);
        }
        slots
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| Err("tracker update produced no outcome".into())))
            .collect()
    }
}
