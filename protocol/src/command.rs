//! Identifiers of requests sent by the host and of responses sent back.

/// Requests the host may send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    /// Switch animation program, value is the program id.
    SetProgram = 0x01,
    /// Set tempo, value 0-255 maps linearly to 60-180 BPM.
    SetTempo = 0x02,
    /// Set intensity, value 0-255 maps to 0.0-1.0.
    SetIntensity = 0x03,
    /// Set base hue, value 0-255 maps to 0.0-1.0.
    SetHue = 0x04,
    /// Set brightness, value is used directly.
    SetBrightness = 0x05,
    /// Trigger flash, value is ignored.
    TriggerFlash = 0x06,
    /// Trigger ripple, value 0-255 maps to an LED index.
    TriggerRipple = 0x07,
    /// Keepalive, answered with [`Response::Pong`].
    Ping = 0x10,
    /// Restore default parameters.
    Reset = 0x11,
}

/// Responses sent back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Response {
    Pong = 0x20,
    Ack = 0x21,
    Nak = 0x22,
    Status = 0x23,
}

/// The byte does not name any known request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownCommand(pub u8);

impl TryFrom<u8> for Command {
    type Error = UnknownCommand;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        let command = match id {
            0x01 => Self::SetProgram,
            0x02 => Self::SetTempo,
            0x03 => Self::SetIntensity,
            0x04 => Self::SetHue,
            0x05 => Self::SetBrightness,
            0x06 => Self::TriggerFlash,
            0x07 => Self::TriggerRipple,
            0x10 => Self::Ping,
            0x11 => Self::Reset,
            _ => return Err(UnknownCommand(id)),
        };
        Ok(command)
    }
}

impl Command {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SetProgram => "SET_PROGRAM",
            Self::SetTempo => "SET_BPM",
            Self::SetIntensity => "SET_INTENSITY",
            Self::SetHue => "SET_HUE",
            Self::SetBrightness => "SET_BRIGHTNESS",
            Self::TriggerFlash => "TRIGGER_FLASH",
            Self::TriggerRipple => "TRIGGER_RIPPLE",
            Self::Ping => "PING",
            Self::Reset => "RESET",
        }
    }
}

impl Response {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Pong => "PONG",
            Self::Ack => "ACK",
            Self::Nak => "NAK",
            Self::Status => "STATUS",
        }
    }
}
