//! Conditioning of raw peripheral readings.

pub mod channel;
pub mod debounce;
pub mod joystick;
pub mod pot;
pub mod snapshot;
pub mod store;
