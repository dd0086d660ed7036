//! Indexed control surface kept for compatibility with older hosts.
//!
//! Cues arrive as pairs of an index and a 7-bit value, typically from
//! control change messages.

use melody_protocol::scale::{TEMPO_MAX, TEMPO_MIN};
use melody_protocol::Program;

use super::Session;
use crate::activity::ActivityClock;
use crate::config::BRIGHTNESS_MAX;
use crate::portal::Portal;
use crate::time::Instant;

pub const CUE_PROGRAM: u8 = 60;
pub const CUE_TEMPO: u8 = 61;
pub const CUE_INTENSITY: u8 = 62;
pub const CUE_HUE: u8 = 63;
pub const CUE_BRIGHTNESS: u8 = 64;
pub const CUE_FLASH: u8 = 65;
pub const CUE_RIPPLE: u8 = 66;

/// Highest value of a cue, larger ones are clamped.
pub const CUE_VALUE_MAX: u8 = 127;

/// Flash fires for values from the upper half.
const FLASH_THRESHOLD: u8 = 64;

impl Session {
    /// Apply a cue, returning whether the index belongs to the surface.
    ///
    /// Selecting a program this way counts as deliberate remote control,
    /// the same as the serial command.
    pub fn apply_cue(
        &mut self,
        index: u8,
        value: u8,
        portal: &mut impl Portal,
        clock: &mut ActivityClock,
        now: Instant,
    ) -> bool {
        let value = value.min(CUE_VALUE_MAX);
        let span = |max: u16| value as u16 * max / CUE_VALUE_MAX as u16;

        match index {
            CUE_PROGRAM => {
                if let Ok(program) = Program::try_from(value) {
                    self.idle.select(program, portal, clock, now);
                }
            }
            CUE_TEMPO => {
                let range = (TEMPO_MAX - TEMPO_MIN) as u16;
                portal.set_tempo(TEMPO_MIN + span(range) as f32);
            }
            CUE_INTENSITY => portal.set_intensity(value as f32 / CUE_VALUE_MAX as f32),
            CUE_HUE => portal.set_hue(value as f32 / CUE_VALUE_MAX as f32),
            CUE_BRIGHTNESS => {
                let brightness = span(BRIGHTNESS_MAX as u16) as u8;
                self.idle.set_brightness(brightness, portal);
            }
            CUE_FLASH => {
                if value >= FLASH_THRESHOLD {
                    portal.flash();
                }
            }
            CUE_RIPPLE => {
                let last = self.led_count.saturating_sub(1) as u16;
                portal.ripple(span(last) as u8);
            }
            _ => return false,
        }

        true
    }
}
