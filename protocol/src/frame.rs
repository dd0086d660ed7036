//! Fixed size frame with start and end markers and an XOR checksum.

use crate::command::Response;

/// Marker opening every frame.
pub const START: u8 = 0xAA;

/// Marker closing every frame.
pub const END: u8 = 0x55;

/// Length of a frame in bytes, markers included.
pub const FRAME_LEN: usize = 5;

/// A single frame as it travels over the wire.
///
/// Decoding never fails, it simply copies bytes into their slots. Use
/// [`Frame::is_valid`] to find out whether the frame is worth dispatching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub start: u8,
    pub command: u8,
    pub value: u8,
    pub checksum: u8,
    pub end: u8,
}

impl Frame {
    #[must_use]
    pub const fn new(command: u8, value: u8) -> Self {
        Self {
            start: START,
            command,
            value,
            checksum: checksum(command, value),
            end: END,
        }
    }

    #[must_use]
    pub const fn response(response: Response, value: u8) -> Self {
        Self::new(response as u8, value)
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Self {
            start: bytes[0],
            command: bytes[1],
            value: bytes[2],
            checksum: bytes[3],
            end: bytes[4],
        }
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; FRAME_LEN] {
        [self.start, self.command, self.value, self.checksum, self.end]
    }

    #[must_use]
    pub const fn has_markers(&self) -> bool {
        self.start == START && self.end == END
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.has_markers() && self.checksum == checksum(self.command, self.value)
    }
}

#[must_use]
pub const fn checksum(command: u8, value: u8) -> u8 {
    command ^ value
}

#[must_use]
pub const fn encode(command: u8, value: u8) -> [u8; FRAME_LEN] {
    Frame::new(command, value).to_bytes()
}

#[must_use]
pub const fn decode(bytes: [u8; FRAME_LEN]) -> Frame {
    Frame::from_bytes(bytes)
}
