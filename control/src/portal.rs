//! Parameters of the animation running on the portal.

#[allow(unused_imports)]
use micromath::F32Ext;

use melody_protocol::scale::{TEMPO_MAX, TEMPO_MIN};
use melody_protocol::Program;

use crate::config::BRIGHTNESS_MAX;

/// The animation engine, as seen by the command session.
///
/// Setters are expected to accept any value, clamping it into their own
/// domain. None of them can fail.
pub trait Portal {
    fn set_program(&mut self, program: Program);
    fn set_tempo(&mut self, bpm: f32);
    fn set_intensity(&mut self, intensity: f32);
    fn set_hue(&mut self, hue: f32);
    fn set_brightness(&mut self, brightness: u8);
    fn flash(&mut self);
    fn ripple(&mut self, position: u8);
    fn program(&self) -> Program;
    fn frame_count(&self) -> u32;
}

pub const DEFAULT_PROGRAM: Program = Program::Ambient;
pub const DEFAULT_TEMPO: f32 = 120.0;
pub const DEFAULT_INTENSITY: f32 = 0.7;
pub const DEFAULT_HUE: f32 = 0.0;
pub const DEFAULT_BRIGHTNESS: u8 = BRIGHTNESS_MAX;

/// Reference holder of animation parameters.
///
/// A renderer can embed it and read the fields every frame. Triggers are
/// latched until the renderer takes them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Parameters {
    pub program: Program,
    pub tempo: f32,
    pub intensity: f32,
    pub hue: f32,
    pub brightness: u8,
    pub frame_count: u32,
    flash: bool,
    ripple: Option<u8>,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM,
            tempo: DEFAULT_TEMPO,
            intensity: DEFAULT_INTENSITY,
            hue: DEFAULT_HUE,
            brightness: DEFAULT_BRIGHTNESS,
            frame_count: 0,
            flash: false,
            ripple: None,
        }
    }
}

impl Parameters {
    /// Take a pending flash trigger.
    pub fn take_flash(&mut self) -> bool {
        core::mem::take(&mut self.flash)
    }

    /// Take a pending ripple trigger and its LED position.
    pub fn take_ripple(&mut self) -> Option<u8> {
        self.ripple.take()
    }
}

impl Portal for Parameters {
    fn set_program(&mut self, program: Program) {
        self.program = program;
    }

    fn set_tempo(&mut self, bpm: f32) {
        self.tempo = bpm.clamp(TEMPO_MIN, TEMPO_MAX);
    }

    fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.clamp(0.0, 1.0);
    }

    fn set_hue(&mut self, hue: f32) {
        self.hue = wrap(hue);
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn flash(&mut self) {
        self.flash = true;
    }

    fn ripple(&mut self, position: u8) {
        self.ripple = Some(position);
    }

    fn program(&self) -> Program {
        self.program
    }

    fn frame_count(&self) -> u32 {
        self.frame_count
    }
}

/// Restore the parameter set the machine boots with.
pub fn apply_defaults(portal: &mut impl Portal) {
    portal.set_program(DEFAULT_PROGRAM);
    portal.set_tempo(DEFAULT_TEMPO);
    portal.set_intensity(DEFAULT_INTENSITY);
    portal.set_hue(DEFAULT_HUE);
    portal.set_brightness(DEFAULT_BRIGHTNESS);
}

fn wrap(x: f32) -> f32 {
    let wrapped = x - x.floor();
    // Tiny negative inputs round up to exactly 1.0.
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}
