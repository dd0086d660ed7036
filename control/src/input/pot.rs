//! Pot abstraction smoothing its readings and deciding when to report.

use crate::config::PotConfig;
use crate::time::{elapsed, Instant};

/// Highest value a pot reports.
pub const VALUE_MAX: u8 = 127;

// Fractional bits of the fixed-point moving average.
const FRACTION: u32 = 8;
const ONE: i32 = 1 << FRACTION;
const HALF: i32 = ONE / 2;

/// Abstraction of a potentiometer.
///
/// Raw ADC readings are scaled to the 0-127 output range and passed through
/// an exponential moving average. The average is reported only once it
/// moved by at least the deadband, the rate limit elapsed since the last
/// report and the value held still for the settle time. A move of at least
/// the large-change threshold is reported right away.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pot {
    config: PotConfig,
    smoothed: Option<i32>,
    candidate: u8,
    candidate_since: Instant,
    reported: u8,
    last_report: Instant,
    changed: bool,
}

impl Pot {
    #[must_use]
    pub fn new(config: PotConfig) -> Self {
        Self {
            config,
            smoothed: None,
            candidate: 0,
            candidate_since: Instant::from_ticks(0),
            reported: 0,
            last_report: Instant::from_ticks(0),
            changed: false,
        }
    }

    /// Feed a raw reading, returning the new value if it is to be reported.
    ///
    /// The very first reading seeds the filter and is taken as reported
    /// without being announced.
    pub fn update(&mut self, raw: u16, now: Instant) -> Option<u8> {
        self.changed = false;
        let target = self.scale(raw);

        let Some(smoothed) = self.smoothed else {
            self.smoothed = Some(target);
            self.candidate = round(target);
            self.candidate_since = now;
            self.reported = self.candidate;
            self.last_report = now;
            return None;
        };

        let smoothed = smoothed + (target - smoothed) * self.config.alpha as i32 / ONE;
        self.smoothed = Some(smoothed);

        let value = round(smoothed);
        if value != self.candidate {
            self.candidate = value;
            self.candidate_since = now;
        }

        let delta = value.abs_diff(self.reported);
        if delta < self.config.deadband {
            return None;
        }

        let large = delta >= self.config.large_change;
        let rate_passed = elapsed(now, self.last_report) >= self.config.rate_limit;
        let settled = elapsed(now, self.candidate_since) >= self.config.settle;
        if large || (rate_passed && settled) {
            self.reported = value;
            self.last_report = now;
            self.changed = true;
            Some(value)
        } else {
            None
        }
    }

    /// The last reported value.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.reported
    }

    /// Whether a new value was reported during the latest update.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.changed
    }

    fn scale(&self, raw: u16) -> i32 {
        let full_scale = self.config.full_scale.max(1) as i32;
        let raw = raw.min(self.config.full_scale) as i32;
        raw * VALUE_MAX as i32 * ONE / full_scale
    }
}

fn round(fixed: i32) -> u8 {
    ((fixed + HALF) >> FRACTION).clamp(0, VALUE_MAX as i32) as u8
}
