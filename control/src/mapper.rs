//! Translation of conditioned inputs into discrete output events.

use crate::input::channel::{ButtonId, Channel as _, Direction, PotId, SwitchId};
use crate::input::store::Store as Inputs;

/// Sink of output events, such as a MIDI port.
///
/// Calls are fire-and-forget.
pub trait Transport {
    fn begin(&mut self, index: u8, magnitude: u8);
    fn end(&mut self, index: u8, magnitude: u8);
    fn value(&mut self, controller: u8, value: u8);
}

/// First index of button events, assigned in order of buttons.
pub const BUTTON_BASE: u8 = 60;
pub const BEGIN_MAGNITUDE: u8 = 100;
pub const END_MAGNITUDE: u8 = 0;

/// First controller of pots, assigned in order of pots.
pub const POT_BASE: u8 = 1;

/// First controller of joystick directions, in order up, down, left, right.
pub const JOYSTICK_BASE: u8 = 10;
pub const PULSE_VALUE: u8 = 127;

/// First controller of switches, assigned in order of switches.
pub const SWITCH_BASE: u8 = 20;
pub const SWITCH_ON: u8 = 127;
pub const SWITCH_OFF: u8 = 0;

/// Controller carrying the bitmask of the first `AGGREGATE_WIDTH` switches.
pub const AGGREGATE_CONTROLLER: u8 = 50;
pub const AGGREGATE_WIDTH: usize = 8;

#[must_use]
pub fn button_index(id: ButtonId) -> u8 {
    BUTTON_BASE + id.index() as u8
}

#[must_use]
pub fn pot_controller(id: PotId) -> u8 {
    POT_BASE + id.index() as u8
}

#[must_use]
pub fn joystick_controller(direction: Direction) -> u8 {
    JOYSTICK_BASE + direction.index() as u8
}

#[must_use]
pub fn switch_controller(id: SwitchId) -> u8 {
    SWITCH_BASE + id.index() as u8
}

/// Emits events for transitions committed during the latest input update.
///
/// Per-channel edges and reports come straight from the input store. The
/// only state kept here is the last emitted aggregate, so the bitmask is
/// sent once per distinct value and never on every underlying change.
#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mapper {
    aggregate: u8,
}

impl Mapper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map(&mut self, inputs: &Inputs, transport: &mut impl Transport) {
        for (id, button) in inputs.button.iter() {
            if button.just_went_high() {
                transport.begin(button_index(id), BEGIN_MAGNITUDE);
            } else if button.just_went_low() {
                transport.end(button_index(id), END_MAGNITUDE);
            }
        }

        for (id, pot) in inputs.pot.iter() {
            if pot.changed() {
                transport.value(pot_controller(id), pot.value());
            }
        }

        for (direction, tilt) in inputs.joystick.iter() {
            if tilt.pressed() {
                transport.value(joystick_controller(direction), PULSE_VALUE);
            }
        }

        for (id, switch) in inputs.switch.iter() {
            if switch.changed() {
                let value = if switch.is_high() { SWITCH_ON } else { SWITCH_OFF };
                transport.value(switch_controller(id), value);
            }
        }

        let aggregate = aggregate(inputs);
        if aggregate != self.aggregate {
            self.aggregate = aggregate;
            transport.value(AGGREGATE_CONTROLLER, aggregate);
        }
    }

    /// The last emitted aggregate bitmask.
    #[must_use]
    pub fn last_aggregate(&self) -> u8 {
        self.aggregate
    }
}

/// Bit `i` holds the stable state of switch `i`.
fn aggregate(inputs: &Inputs) -> u8 {
    inputs
        .switch
        .iter()
        .take(AGGREGATE_WIDTH)
        .filter(|(_, switch)| switch.is_high())
        .fold(0, |bits, (id, _)| bits | (1 << id.index()))
}
