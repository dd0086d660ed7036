//! Animation programs the portal renderer knows.

/// Number of available programs. Valid ids are `0..PROGRAM_COUNT`.
pub const PROGRAM_COUNT: u8 = 10;

/// Programs picked from while the machine idles.
pub const AMBIENT_PROGRAMS: [Program; 4] = [
    Program::Ambient,
    Program::Breathe,
    Program::Rainbow,
    Program::Plasma,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Program {
    Spiral = 0,
    Pulse = 1,
    Wave = 2,
    Chaos = 3,
    Ambient = 4,
    Idle = 5,
    Ripple = 6,
    Rainbow = 7,
    Plasma = 8,
    Breathe = 9,
}

/// The id is outside of `0..PROGRAM_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProgramOutOfRange(pub u8);

impl TryFrom<u8> for Program {
    type Error = ProgramOutOfRange;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        let program = match id {
            0 => Self::Spiral,
            1 => Self::Pulse,
            2 => Self::Wave,
            3 => Self::Chaos,
            4 => Self::Ambient,
            5 => Self::Idle,
            6 => Self::Ripple,
            7 => Self::Rainbow,
            8 => Self::Plasma,
            9 => Self::Breathe,
            _ => return Err(ProgramOutOfRange(id)),
        };
        Ok(program)
    }
}

impl Program {
    #[must_use]
    pub fn id(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Spiral => "SPIRAL",
            Self::Pulse => "PULSE",
            Self::Wave => "WAVE",
            Self::Chaos => "CHAOS",
            Self::Ambient => "AMBIENT",
            Self::Idle => "IDLE",
            Self::Ripple => "RIPPLE",
            Self::Rainbow => "RAINBOW",
            Self::Plasma => "PLASMA",
            Self::Breathe => "BREATHE",
        }
    }
}
