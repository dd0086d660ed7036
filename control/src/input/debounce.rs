//! Stability filter of a digital line.

use crate::time::{elapsed, Duration, Instant};

/// Debounced state of a single digital channel.
///
/// Any change of the raw sample restarts the hold timer. Only once the raw
/// sample stays put for the whole window is it committed as the new stable
/// state, raising exactly one edge flag for that tick.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    window: Duration,
    raw: bool,
    stable: bool,
    previous: bool,
    last_change: Instant,
    went_high: bool,
    went_low: bool,
}

impl Debouncer {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            raw: false,
            stable: false,
            previous: false,
            last_change: Instant::from_ticks(0),
            went_high: false,
            went_low: false,
        }
    }

    pub fn update(&mut self, raw: bool, now: Instant) {
        self.went_high = false;
        self.went_low = false;

        if raw != self.raw {
            self.raw = raw;
            self.last_change = now;
        }

        if self.raw != self.stable && elapsed(now, self.last_change) >= self.window {
            self.previous = self.stable;
            self.stable = self.raw;
            self.went_high = self.stable;
            self.went_low = !self.stable;
        }
    }

    /// The committed state.
    #[must_use]
    pub fn is_high(&self) -> bool {
        self.stable
    }

    /// The committed state before the latest transition.
    #[must_use]
    pub fn previous(&self) -> bool {
        self.previous
    }

    #[must_use]
    pub fn just_went_high(&self) -> bool {
        self.went_high
    }

    #[must_use]
    pub fn just_went_low(&self) -> bool {
        self.went_low
    }

    #[must_use]
    pub fn changed(&self) -> bool {
        self.went_high || self.went_low
    }
}
