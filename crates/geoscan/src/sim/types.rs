//! Events, run summaries and progress observers.

use std::cmp::Ordering;

use crate::geom3::VertexId;

/// Scheduled arrival of the signal at `vertex` at simulated `time`.
///
/// Ordering and equality use `(tick, vertex)` only, where `tick` is the time
/// quantized by the simulator's `time_eps`.
#[derive(Clone, Copy, Debug)]
pub struct Entry {
    pub vertex: VertexId,
    pub time: f64,
    tick: i64,
}

impl Entry {
    pub fn new(vertex: VertexId, time: f64, time_eps: f64) -> Self {
        Self {
            vertex,
            time,
            tick: (time / time_eps).round() as i64,
        }
    }

    #[inline]
    pub fn tick(&self) -> i64 {
        self.tick
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tick
            .cmp(&other.tick)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

/// Final state of a finished run.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanSummary {
    /// Events processed, including the seed event.
    pub processed: u64,
    /// Integer time boundaries crossed.
    pub timestamp: u64,
    /// Per-vertex arrival counts.
    pub arrivals: Vec<u64>,
}

/// Progress hooks called by `ScanNet`; both default to no-ops.
pub trait ScanObserver {
    /// After `entry` was processed and counted.
    fn on_event(&mut self, _entry: &Entry, _arrivals: &[u64]) {}

    /// The next event lies past the integer boundary `timestamp`.
    fn on_timestamp(&mut self, _timestamp: u64, _arrivals: &[u64]) {}
}

/// Ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}

/// Reports timestamps through `tracing`, optionally with a counter snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver {
    pub snapshots: bool,
}

impl ScanObserver for LogObserver {
    fn on_timestamp(&mut self, timestamp: u64, arrivals: &[u64]) {
        if self.snapshots {
            tracing::info!(timestamp, ?arrivals, "sim reached timestamp");
        } else {
            tracing::info!(timestamp, "sim reached timestamp");
        }
    }
}
