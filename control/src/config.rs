//! Tunables of input conditioning and of the command session.
//!
//! Defaults reflect the values the machine ships with. All of them are plain
//! data, meant to be built once during initialization and moved into the
//! components.

use crate::time::Duration;

pub const DEBOUNCE: Duration = Duration::millis(5);
pub const JOYSTICK_REARM: Duration = Duration::millis(120);
pub const IDLE_TIMEOUT: Duration = Duration::millis(30_000);
pub const MESSAGE_TIMEOUT: Duration = Duration::millis(100);
pub const ROTATION_INTERVAL: Duration = Duration::millis(60_000);

/// Number of LEDs on the portal ring.
pub const LED_COUNT: u8 = 45;

/// Brightness the portal starts with and returns to on reset.
pub const BRIGHTNESS_MAX: u8 = 160;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub input: InputConfig,
    pub session: SessionConfig,
}

impl Config {
    /// Set the idle timeout of both input activity tracking and the idle
    /// program switching, keeping them in agreement.
    #[must_use]
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.input.idle_timeout = timeout;
        self.session.idle.timeout = timeout;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputConfig {
    pub button_debounce: Duration,
    pub switch_debounce: Duration,
    pub joystick_rearm: Duration,
    pub idle_timeout: Duration,
    pub pot: PotConfig,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            button_debounce: DEBOUNCE,
            switch_debounce: DEBOUNCE,
            joystick_rearm: JOYSTICK_REARM,
            idle_timeout: IDLE_TIMEOUT,
            pot: PotConfig::default(),
        }
    }
}

/// Smoothing and reporting policy of a pot.
///
/// Units of `deadband` and `large_change` are steps of the 0-127 output
/// range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PotConfig {
    /// Weight of a new sample in the moving average, out of 256.
    pub alpha: u8,
    pub deadband: u8,
    pub rate_limit: Duration,
    pub settle: Duration,
    pub large_change: u8,
    /// Raw reading of a pot turned fully clockwise.
    pub full_scale: u16,
}

impl Default for PotConfig {
    fn default() -> Self {
        Self {
            alpha: 64,
            deadband: 2,
            rate_limit: Duration::millis(15),
            settle: Duration::millis(4),
            large_change: 8,
            full_scale: 1023,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionConfig {
    /// Partial frame is dropped when no byte arrives for this long.
    pub message_timeout: Duration,
    pub led_count: u8,
    pub idle: IdleConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            message_timeout: MESSAGE_TIMEOUT,
            led_count: LED_COUNT,
            idle: IdleConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IdleConfig {
    pub timeout: Duration,
    pub rotation_interval: Duration,
    /// Share of the commanded brightness kept while idle, in percent.
    pub brightness_pct: u8,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            timeout: IDLE_TIMEOUT,
            rotation_interval: ROTATION_INTERVAL,
            brightness_pct: 15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_timeout_is_applied_to_inputs_and_session_alike() {
        let config = Config::default().with_idle_timeout(Duration::millis(500));
        assert_eq!(config.input.idle_timeout, Duration::millis(500));
        assert_eq!(config.session.idle.timeout, Duration::millis(500));
    }
}
