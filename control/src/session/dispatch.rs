//! Execution of received commands.

use melody_protocol::scale::{led_position, normalized, tempo};
use melody_protocol::{Command, Frame, Program, ProgramOutOfRange, Response, UnknownCommand};

use super::Session;
use crate::activity::ActivityClock;
use crate::log;
use crate::portal::{self, Portal, DEFAULT_BRIGHTNESS};
use crate::time::Instant;

/// Reason for refusing a well-formed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rejection {
    UnknownCommand(u8),
    ProgramOutOfRange(u8),
}

impl From<UnknownCommand> for Rejection {
    fn from(other: UnknownCommand) -> Self {
        Self::UnknownCommand(other.0)
    }
}

impl From<ProgramOutOfRange> for Rejection {
    fn from(other: ProgramOutOfRange) -> Self {
        Self::ProgramOutOfRange(other.0)
    }
}

impl Session {
    /// Apply the command carried by a valid frame.
    ///
    /// Nothing is mutated when the command gets rejected.
    pub(super) fn dispatch(
        &mut self,
        frame: Frame,
        portal: &mut impl Portal,
        clock: &mut ActivityClock,
        now: Instant,
    ) -> Result<Response, Rejection> {
        let command = Command::try_from(frame.command)?;
        let value = frame.value;
        log::debug!("Dispatching {}({=u8})", command.name(), value);

        match command {
            Command::SetProgram => {
                let program = Program::try_from(value)?;
                self.idle.select(program, portal, clock, now);
            }
            Command::SetTempo => portal.set_tempo(tempo(value)),
            Command::SetIntensity => portal.set_intensity(normalized(value)),
            Command::SetHue => portal.set_hue(normalized(value)),
            Command::SetBrightness => self.idle.set_brightness(value, portal),
            Command::TriggerFlash => portal.flash(),
            Command::TriggerRipple => portal.ripple(led_position(value, self.led_count)),
            Command::Ping => return Ok(Response::Pong),
            Command::Reset => {
                log::info!("Resetting portal parameters to defaults");
                portal::apply_defaults(portal);
                self.idle.set_brightness(DEFAULT_BRIGHTNESS, portal);
            }
        }

        Ok(Response::Ack)
    }
}
