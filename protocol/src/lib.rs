//! Wire protocol spoken between the host and the machine's controller.
//!
//! Every message is a fixed five byte frame:
//!
//! ```text
//! [0xAA][CMD][VAL][CMD ^ VAL][0x55]
//! ```
//!
//! This crate holds no state. It is shared by the firmware and by any host
//! side tooling that needs to build or inspect frames.

#![cfg_attr(not(test), no_std)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]

#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod command;
pub mod frame;
pub mod program;
pub mod scale;

pub use command::{Command, Response, UnknownCommand};
pub use frame::{decode, encode, Frame, END, FRAME_LEN, START};
pub use program::{Program, ProgramOutOfRange, AMBIENT_PROGRAMS, PROGRAM_COUNT};
