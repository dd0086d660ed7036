//! Momentary joystick direction recognising presses at a limited rate.

use super::debounce::Debouncer;
use crate::time::{elapsed, Duration, Instant};

/// A single joystick direction.
///
/// The contact is debounced like a button. On top of that, a rising edge is
/// recognised as a press only if no other press was recognised during the
/// rearm window. Rejected edges are dropped, not postponed.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tilt {
    debouncer: Debouncer,
    rearm: Duration,
    last_press: Option<Instant>,
    pressed: bool,
}

impl Tilt {
    #[must_use]
    pub fn new(debounce: Duration, rearm: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(debounce),
            rearm,
            last_press: None,
            pressed: false,
        }
    }

    pub fn update(&mut self, raw: bool, now: Instant) {
        self.debouncer.update(raw, now);

        self.pressed = self.debouncer.just_went_high()
            && self
                .last_press
                .map_or(true, |last| elapsed(now, last) >= self.rearm);

        if self.pressed {
            self.last_press = Some(now);
        }
    }

    /// Whether a press was recognised during the latest update.
    #[must_use]
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    #[must_use]
    pub fn is_held(&self) -> bool {
        self.debouncer.is_high()
    }

    /// Whether the debounced contact changed during the latest update.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.debouncer.changed()
    }
}
