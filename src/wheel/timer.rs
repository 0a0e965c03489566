//! Clock and cancellable timer handles for the cooperative spin loop.
//!
//! Nothing here runs on its own thread. The host calls the scheduler's
//! `poll` from its event loop; the timers only answer "what is due now"
//! and remember whether they were cancelled.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of elapsed time for the scheduler.
pub trait Clock {
    /// Time elapsed since some fixed origin. Must never go backwards.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// A repeating timer that fires every `period`, starting one period after
/// it was started.
///
/// Missed firings are not dropped: if the host polls late, each overdue
/// firing is reported in order with the time it was scheduled for.
#[derive(Debug, Clone)]
pub struct PeriodicTimer {
    period: Duration,
    next_due: Duration,
    cancelled: bool,
}

impl PeriodicTimer {
    /// Starts a timer at `now`.
    ///
    /// A zero period would never catch up, so it is raised to one
    /// millisecond.
    pub fn start(now: Duration, period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            next_due: now + period,
            cancelled: false,
        }
    }

    /// Returns the scheduled time of the next due firing and advances past
    /// it, or `None` if nothing is due at `now` or the timer was cancelled.
    pub fn next_due(&mut self, now: Duration) -> Option<Duration> {
        if self.cancelled || now < self.next_due {
            return None;
        }
        let at = self.next_due;
        self.next_due += self.period;
        Some(at)
    }

    /// Stops all future firings.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// A one-shot deadline.
#[derive(Debug, Clone)]
pub struct Timeout {
    deadline: Duration,
    cancelled: bool,
}

impl Timeout {
    /// Starts a timeout that falls due `delay` after `now`.
    pub fn start(now: Duration, delay: Duration) -> Self {
        Self {
            deadline: now + delay,
            cancelled: false,
        }
    }

    /// Whether the deadline has passed and the timeout is still live.
    pub fn is_due(&self, now: Duration) -> bool {
        !self.cancelled && now >= self.deadline
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_manual_clock_is_shared() {
        let clock = ManualClock::new();
        let other = clock.clone();
        clock.advance(250 * MS);
        assert_eq!(other.now(), 250 * MS);
    }

    #[test]
    fn test_periodic_timer_catches_up_in_order() {
        let mut timer = PeriodicTimer::start(Duration::ZERO, 50 * MS);
        assert_eq!(timer.next_due(49 * MS), None);

        let fired: Vec<Duration> = std::iter::from_fn(|| timer.next_due(160 * MS)).collect();
        assert_eq!(fired, vec![50 * MS, 100 * MS, 150 * MS]);
        assert_eq!(timer.next_due(199 * MS), None);
        assert_eq!(timer.next_due(200 * MS), Some(200 * MS));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timer = PeriodicTimer::start(Duration::ZERO, 50 * MS);
        timer.cancel();
        assert!(timer.is_cancelled());
        assert_eq!(timer.next_due(Duration::from_secs(10)), None);
    }

    #[test]
    fn test_timeout() {
        let mut timeout = Timeout::start(100 * MS, 5000 * MS);
        assert_eq!(timeout.deadline(), 5100 * MS);
        assert!(!timeout.is_due(5099 * MS));
        assert!(timeout.is_due(5100 * MS));
        timeout.cancel();
        assert!(!timeout.is_due(6000 * MS));
    }
}
