//! Timestamp of the latest user activity, shared by inputs and the session.

use crate::time::{elapsed, Duration, Instant};

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActivityClock {
    last: Instant,
}

impl ActivityClock {
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    pub fn touch(&mut self, now: Instant) {
        self.last = now;
    }

    #[must_use]
    pub fn last(&self) -> Instant {
        self.last
    }

    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        elapsed(now, self.last)
    }

    /// Whether more than `timeout` passed since the latest activity.
    #[must_use]
    pub fn is_stale(&self, now: Instant, timeout: Duration) -> bool {
        self.elapsed(now) > timeout
    }
}

impl Default for ActivityClock {
    fn default() -> Self {
        Self::new(Instant::from_ticks(0))
    }
}
