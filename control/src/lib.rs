//! Conditioning of user input and the command session with a host.
//!
//! It is meant to run in a firmware with a single fixed-rate loop. Every
//! tick, the caller samples the hardware, reads its timer and passes both
//! to the store. Nothing here blocks, allocates or reads a clock.
//!
//! Following is the flow of a single tick:
//!
//! ```text
//!   [Buttons] [Joystick] [Switches] [Pots]           [Serial]
//!        |        |          |         |                 |
//!        +--------+----+-----+---------+           (bytes) |
//!                      | (Snapshot)                      V
//!                      V                           [ Receiver ]
//!               [ Input {Debouncer, Pot} ]               |
//!                 |            |                 (Frame) |
//!                 |     {ActivityClock} <-----+          V
//!                 V                           +---- [ Session {Idle} ]
//!             [ Mapper ]                                 |
//!                 |                                      V
//!                 V                                  [ Portal ]
//!            [ Transport ]
//! ```

#![cfg_attr(not(test), no_std)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]

#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod activity;
pub mod config;
pub mod input;
mod log;
pub mod mapper;
pub mod portal;
pub mod random;
pub mod session;
pub mod store;
pub mod time;

pub use crate::activity::ActivityClock;
pub use crate::config::Config;
pub use crate::input::snapshot::Snapshot as InputSnapshot;
pub use crate::mapper::Transport;
pub use crate::portal::{Parameters, Portal};
pub use crate::random::Random;
pub use crate::session::receiver::Stats;
pub use crate::session::Link;
pub use crate::store::Store;
pub use crate::time::{Duration, Instant};
