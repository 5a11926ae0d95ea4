//! Rate limiting for high-frequency events.

use web_time::Duration;

/// Leading-edge rate limiter driven by the host clock.
///
/// The first call always runs; later calls run only once `interval` has
/// elapsed since the last call that ran. Suppressed calls are dropped, not
/// queued.
#[derive(Debug, Clone)]
pub struct Throttle {
    /// Minimum spacing between two runs.
    interval: Duration,
    /// Clock reading of the last run, `None` before the first.
    last_run: Option<Duration>,
}

impl Throttle {
    /// Create a throttle with the given minimum spacing.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
        }
    }

    /// Returns true (and records `now`) if a run is allowed at `now`.
    pub fn try_acquire(&mut self, now: Duration) -> bool {
        let ready = self
            .last_run
            .map_or(true, |last| now.saturating_sub(last) >= self.interval);
        if ready {
            self.last_run = Some(now);
        }
        ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn first_call_runs() {
        let mut throttle = Throttle::new(ms(100));
        assert!(throttle.try_acquire(ms(0)));
    }

    #[test]
    fn calls_inside_window_are_dropped() {
        let mut throttle = Throttle::new(ms(100));
        assert!(throttle.try_acquire(ms(0)));
        assert!(!throttle.try_acquire(ms(40)));
        assert!(!throttle.try_acquire(ms(99)));
        assert!(throttle.try_acquire(ms(100)));
        // Window restarts from the last run, not the last attempt
        assert!(!throttle.try_acquire(ms(150)));
        assert!(throttle.try_acquire(ms(200)));
    }

    #[test]
    fn zero_interval_never_throttles() {
        let mut throttle = Throttle::new(Duration::ZERO);
        assert!(throttle.try_acquire(ms(5)));
        assert!(throttle.try_acquire(ms(5)));
    }
}
