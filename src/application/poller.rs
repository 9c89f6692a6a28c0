//! Fixed-interval polling until a deadline

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

/// Re-checks a condition at a fixed interval until it holds or the timeout elapses.
///
/// The condition is always evaluated at least once, even for a zero timeout.
/// The final sleep is shortened so the last check happens at the deadline.
#[derive(Debug, Clone, Copy)]
pub struct Poller {
    interval: Duration,
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Run `check` until it returns true or `timeout` has passed.
    ///
    /// `check` receives the time left before the deadline (zero on the last attempt).
    /// Returns whether the condition was met.
    pub fn until<F>(&self, timeout: Duration, mut check: F) -> bool
    where
        F: FnMut(Duration) -> bool,
    {
        let started = Instant::now();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let remaining = timeout.saturating_sub(started.elapsed());
            trace!("poll attempt {}: {:?} remaining", attempt, remaining);

            if check(remaining) {
                debug!("condition met after {} attempt(s)", attempt);
                return true;
            }

            let remaining = timeout.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                debug!(
                    "gave up after {} attempt(s) in {:?}",
                    attempt,
                    started.elapsed()
                );
                return false;
            }
            thread::sleep(self.interval.min(remaining));
        }
    }
}
