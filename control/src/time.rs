//! Monotonic time threaded through every update.
//!
//! Nothing in this crate reads a clock on its own. The caller samples its
//! timer once per tick and passes the instant down. Instants are 64 bit, so
//! a timestamp left untouched for weeks still compares as past.

/// Millisecond timestamp.
pub type Instant = fugit::TimerInstantU64<1_000>;

/// Millisecond span.
pub type Duration = fugit::MillisDurationU64;

/// Time passed from `since` to `now`, zero if `since` lies in the future.
#[must_use]
pub fn elapsed(now: Instant, since: Instant) -> Duration {
    now.checked_duration_since(since)
        .unwrap_or(Duration::from_ticks(0))
}

#[cfg(test)]
pub(crate) fn ms(ticks: u32) -> Instant {
    Instant::from_ticks(ticks.into())
}

/// More than half of the 32 bit millisecond range, roughly 25 days.
#[cfg(test)]
pub(crate) const LONG_QUIET: u32 = (1 << 31) + 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_time_is_difference_of_instants() {
        assert_eq!(elapsed(ms(150), ms(100)), Duration::millis(50));
    }

    #[test]
    fn when_since_is_in_future_elapsed_is_zero() {
        assert_eq!(elapsed(ms(100), ms(150)), Duration::millis(0));
    }

    #[test]
    fn when_since_is_weeks_old_elapsed_keeps_growing() {
        assert_eq!(
            elapsed(ms(LONG_QUIET), ms(0)),
            Duration::millis(u64::from(LONG_QUIET))
        );

        let years_later = Instant::from_ticks(u64::from(u32::MAX) * 20);
        assert_eq!(
            elapsed(years_later, ms(10)),
            Duration::millis(u64::from(u32::MAX) * 20 - 10)
        );
    }
}
