//! Translation of frame values into animation parameters.

/// Tempo reached with value 0.
pub const TEMPO_MIN: f32 = 60.0;

/// Tempo reached with value 255.
pub const TEMPO_MAX: f32 = 180.0;

/// Map 0-255 linearly onto 60-180 BPM.
#[must_use]
pub fn tempo(value: u8) -> f32 {
    TEMPO_MIN + normalized(value) * (TEMPO_MAX - TEMPO_MIN)
}

/// Map 0-255 onto 0.0-1.0, both ends included.
#[must_use]
pub fn normalized(value: u8) -> f32 {
    value as f32 / 255.0
}

/// Map 0-255 onto an LED index proportionally to the strip length.
///
/// Value 255 lands on the last LED, 0 on the first.
#[must_use]
pub fn led_position(value: u8, led_count: u8) -> u8 {
    let last = led_count.saturating_sub(1) as u16;
    (value as u16 * last / 255) as u8
}
