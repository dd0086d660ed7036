//! Structures used to pass the current state of hardware peripherals.

use super::channel::{Buttons, Directions, Pots, Switches};

/// The current state of all peripherals.
///
/// `Snapshot` is meant to be passed from the hardware binding to the
/// control package once per tick. It carries raw data only: contacts are
/// not debounced and pots hold plain ADC readings.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    pub button: Buttons<bool>,
    pub joystick: Directions<bool>,
    pub switch: Switches<bool>,
    pub pot: Pots<u16>,
}
