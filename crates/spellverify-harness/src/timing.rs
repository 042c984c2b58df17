// Scoped wall-clock timing for engine calls

use std::time::{Duration, Instant};

/// A running stopwatch whose laps share their boundary timestamps.
///
/// Bracketing two back-to-back calls takes exactly three clock reads:
///
/// ```
/// use spellverify_harness::timing::Stopwatch;
///
/// let mut watch = Stopwatch::start();   // t1
/// let a = 2 + 2;
/// let elapsed_a = watch.lap();          // t2: closes A, opens B
/// let b = 3 + 3;
/// let elapsed_b = watch.lap();          // t3
/// assert_eq!((a, b), (4, 6));
/// assert!(elapsed_a + elapsed_b < std::time::Duration::from_secs(1));
/// ```
#[derive(Debug)]
pub struct Stopwatch {
    mark: Instant,
}

impl Stopwatch {
    #[inline]
    pub fn start() -> Self {
        Self {
            mark: Instant::now(),
        }
    }

    /// Time since the previous lap (or start); the current instant becomes
    /// the start of the next lap.
    #[inline]
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.mark);
        self.mark = now;
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laps_are_contiguous() {
        let start = Instant::now();
        let mut watch = Stopwatch::start();
        std::thread::sleep(Duration::from_millis(2));
        let first = watch.lap();
        std::thread::sleep(Duration::from_millis(2));
        let second = watch.lap();
        let wall = start.elapsed();
        assert!(first >= Duration::from_millis(2));
        assert!(second >= Duration::from_millis(2));
        assert!(first + second <= wall);
    }
}
