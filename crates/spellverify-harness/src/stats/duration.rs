// Latency accumulators: total / min / max / count per (engine, operation)

use std::time::Duration;

use spellverify_core::{Engine, Operation};

/// Running latency figures for one engine and one operation.
///
/// `min` starts at [`Duration::MAX`] and `max` at zero, so the first sample
/// sets both. Once `count > 0`, `min <= total / count <= max` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationStats {
    total: Duration,
    min: Duration,
    max: Duration,
    count: u64,
}

impl Default for DurationStats {
    fn default() -> Self {
        Self {
            total: Duration::ZERO,
            min: Duration::MAX,
            max: Duration::ZERO,
            count: 0,
        }
    }
}

impl DurationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, elapsed: Duration) {
        self.total = self.total.saturating_add(elapsed);
        self.count += 1;
        if elapsed < self.min {
            self.min = elapsed;
        }
        if elapsed > self.max {
            self.max = elapsed;
        }
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Shortest sample, `None` before the first one.
    pub fn min(&self) -> Option<Duration> {
        (self.count > 0).then_some(self.min)
    }

    /// Longest sample, `None` before the first one.
    pub fn max(&self) -> Option<Duration> {
        (self.count > 0).then_some(self.max)
    }

    /// Integer mean in nanoseconds, `None` before the first sample.
    pub fn average_nanos(&self) -> Option<u128> {
        (self.count > 0).then(|| self.total.as_nanos() / u128::from(self.count))
    }
}

/// The four duration buckets of a run, one per (engine, operation) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationTable {
    buckets: [[DurationStats; 2]; 2],
}

impl DurationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, engine: Engine, operation: Operation, elapsed: Duration) {
        self.buckets[operation.index()][engine.index()].record(elapsed);
    }

    pub fn get(&self, engine: Engine, operation: Operation) -> &DurationStats {
        &self.buckets[operation.index()][engine.index()]
    }
}
