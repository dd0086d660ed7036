//! Process all input peripherals over time.

use super::channel::{Buttons, Directions, Pots, Switches};
use super::debounce::Debouncer;
use super::joystick::Tilt;
use super::pot::Pot;
use super::snapshot::Snapshot;
use crate::activity::ActivityClock;
use crate::config::InputConfig;
use crate::time::{Duration, Instant};

/// Stateful store of raw inputs.
///
/// This struct turns the raw snapshot into a set of conditioned
/// peripherals. Buttons and switches are debounced, joystick presses are
/// rate limited and pots are smoothed. Any committed change counts as user
/// activity.
///
/// Note that despite all its attributes are public, they should be only read
/// from.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Store {
    pub button: Buttons<Debouncer>,
    pub joystick: Directions<Tilt>,
    pub switch: Switches<Debouncer>,
    pub pot: Pots<Pot>,
    activity: ActivityClock,
    idle_timeout: Duration,
}

impl Store {
    #[must_use]
    pub fn new(config: InputConfig) -> Self {
        Self {
            button: Buttons::from_fn(|_| Debouncer::new(config.button_debounce)),
            joystick: Directions::from_fn(|_| {
                Tilt::new(config.button_debounce, config.joystick_rearm)
            }),
            switch: Switches::from_fn(|_| Debouncer::new(config.switch_debounce)),
            pot: Pots::from_fn(|_| Pot::new(config.pot)),
            activity: ActivityClock::default(),
            idle_timeout: config.idle_timeout,
        }
    }

    /// Condition the latest snapshot, returning whether any channel changed.
    pub fn update(&mut self, snapshot: &Snapshot, now: Instant) -> bool {
        let mut active = false;

        for (id, button) in self.button.iter_mut() {
            button.update(snapshot.button[id], now);
            active |= button.changed();
        }

        for (direction, tilt) in self.joystick.iter_mut() {
            tilt.update(snapshot.joystick[direction], now);
            active |= tilt.changed();
        }

        for (id, switch) in self.switch.iter_mut() {
            switch.update(snapshot.switch[id], now);
            active |= switch.changed();
        }

        for (id, pot) in self.pot.iter_mut() {
            pot.update(snapshot.pot[id], now);
            active |= pot.changed();
        }

        if active {
            self.activity.touch(now);
        }

        active
    }

    /// Whether no input changed for longer than the idle timeout.
    #[must_use]
    pub fn is_idle(&self, now: Instant) -> bool {
        self.activity.is_stale(now, self.idle_timeout)
    }

    #[must_use]
    pub fn time_since_activity(&self, now: Instant) -> Duration {
        self.activity.elapsed(now)
    }

    #[must_use]
    pub fn activity(&self) -> &ActivityClock {
        &self.activity
    }

    /// The clock is shared with the command session, which treats deliberate
    /// remote control as activity too.
    pub fn activity_mut(&mut self) -> &mut ActivityClock {
        &mut self.activity
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::channel::{ButtonId, Direction, PotId, SwitchId};
    use crate::time::{ms, LONG_QUIET};

    fn hold(store: &mut Store, snapshot: &Snapshot, from: u32, to: u32) -> bool {
        let mut active = false;
        for t in from..to {
            active |= store.update(snapshot, ms(t));
        }
        active
    }

    #[test]
    fn when_nothing_moves_it_becomes_idle_after_timeout() {
        let mut store = Store::default();
        let snapshot = Snapshot::default();
        assert!(!hold(&mut store, &snapshot, 0, 100));
        assert!(!store.is_idle(ms(30_000)));
        assert!(store.is_idle(ms(30_001)));
    }

    #[test]
    fn when_nothing_moves_for_weeks_it_stays_idle() {
        let mut store = Store::default();
        store.update(&Snapshot::default(), ms(0));
        assert!(store.is_idle(ms(LONG_QUIET)));
        assert!(store.is_idle(Instant::from_ticks(u64::from(u32::MAX) + 1000)));
        assert_eq!(
            store.time_since_activity(ms(LONG_QUIET)),
            Duration::millis(u64::from(LONG_QUIET))
        );
    }

    #[test]
    fn when_button_is_pressed_it_is_debounced_and_touches_activity() {
        let mut store = Store::default();
        let button = ButtonId::new(3).unwrap();
        let mut snapshot = Snapshot::default();
        snapshot.button[button] = true;

        for t in 1000..1005 {
            assert!(!store.update(&snapshot, ms(t)));
        }
        assert!(store.update(&snapshot, ms(1005)));
        assert!(store.button[button].just_went_high());
        assert_eq!(store.time_since_activity(ms(1010)), Duration::millis(5));
        assert!(!store.is_idle(ms(31_005)));
        assert!(store.is_idle(ms(31_006)));
    }

    #[test]
    fn when_switch_is_toggled_it_changes_state() {
        let mut store = Store::default();
        let switch = SwitchId::new(11).unwrap();
        let mut snapshot = Snapshot::default();
        snapshot.switch[switch] = true;

        assert!(hold(&mut store, &snapshot, 0, 10));
        assert!(store.switch[switch].is_high());
    }

    #[test]
    fn when_joystick_retriggers_quickly_only_first_press_is_recognised() {
        let mut store = Store::default();
        let mut presses = 0;
        for t in 0..110 {
            let mut snapshot = Snapshot::default();
            snapshot.joystick[Direction::Left] = (t / 10) % 2 == 0;
            store.update(&snapshot, ms(t));
            if store.joystick[Direction::Left].pressed() {
                presses += 1;
            }
        }
        assert_eq!(presses, 1);
    }

    #[test]
    fn when_pot_is_turned_it_reports_and_touches_activity() {
        let mut store = Store::default();
        let pot = PotId::new(0).unwrap();
        let mut snapshot = Snapshot::default();
        store.update(&snapshot, ms(0));

        snapshot.pot[pot] = 1023;
        assert!(store.update(&snapshot, ms(1)));
        assert!(store.pot[pot].changed());
        assert_eq!(store.pot[pot].value(), 32);
        assert_eq!(store.activity().last(), ms(1));
    }

    #[test]
    fn when_activity_is_touched_externally_idle_is_postponed() {
        let mut store = Store::default();
        store.activity_mut().touch(ms(10_000));
        assert!(!store.is_idle(ms(40_000)));
        assert!(store.is_idle(ms(40_001)));
    }
}
