//! Switching to a calm program when nobody plays and back once they return.

use melody_protocol::{Program, AMBIENT_PROGRAMS};

use crate::activity::ActivityClock;
use crate::config::IdleConfig;
use crate::log;
use crate::portal::{Portal, DEFAULT_BRIGHTNESS};
use crate::random::{self, Random};
use crate::time::{elapsed, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    Active,
    Idle,
}

/// Program selection state of the session.
///
/// While idle, the program selected before idling is remembered together
/// with the brightness last commanded. The portal runs dimmed and rotates
/// through ambient programs on its own pace.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Idle {
    config: IdleConfig,
    state: State,
    remembered: Program,
    brightness: u8,
    rotated: Instant,
}

impl Idle {
    #[must_use]
    pub fn new(config: IdleConfig) -> Self {
        Self {
            config,
            state: State::Active,
            remembered: Program::Idle,
            brightness: DEFAULT_BRIGHTNESS,
            rotated: Instant::from_ticks(0),
        }
    }

    /// Enter idle once activity got stale, rotate programs while idle.
    pub fn tick(
        &mut self,
        portal: &mut impl Portal,
        clock: &ActivityClock,
        random: &mut impl Random,
        now: Instant,
    ) {
        match self.state {
            State::Active => {
                if clock.is_stale(now, self.config.timeout) {
                    self.enter(portal, now);
                }
            }
            State::Idle => {
                if elapsed(now, self.rotated) > self.config.rotation_interval {
                    self.rotated = now;
                    if let Some(&program) = random::choose(&AMBIENT_PROGRAMS, random) {
                        log::info!("Idle rotation to {}", program.name());
                        portal.set_program(program);
                    }
                }
            }
        }
    }

    /// Record user activity, leaving idle if the portal still shows the
    /// idle program.
    pub fn activity(&mut self, portal: &mut impl Portal, clock: &mut ActivityClock, now: Instant) {
        clock.touch(now);
        if self.state == State::Idle && portal.program() == Program::Idle {
            log::info!("Leaving idle, restoring {}", self.remembered.name());
            portal.set_program(self.remembered);
            self.leave(portal);
        }
    }

    /// Select a program on explicit request, which always ends idling.
    pub fn select(
        &mut self,
        program: Program,
        portal: &mut impl Portal,
        clock: &mut ActivityClock,
        now: Instant,
    ) {
        clock.touch(now);
        portal.set_program(program);
        self.remembered = program;
        if self.state == State::Idle {
            log::info!("Leaving idle on remote selection");
            self.leave(portal);
        }
    }

    /// Command a new brightness. While idle, only its dimmed share is
    /// applied until idling ends.
    pub fn set_brightness(&mut self, brightness: u8, portal: &mut impl Portal) {
        self.brightness = brightness;
        portal.set_brightness(self.applied_brightness());
    }

    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == State::Idle
    }

    /// Program to return to once idling ends.
    #[must_use]
    pub fn remembered(&self) -> Program {
        self.remembered
    }

    /// The last commanded brightness, not dimmed.
    #[must_use]
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    fn enter(&mut self, portal: &mut impl Portal, now: Instant) {
        self.remembered = portal.program();
        self.state = State::Idle;
        self.rotated = now;
        log::info!("Entering idle, remembering {}", self.remembered.name());
        portal.set_program(Program::Idle);
        portal.set_brightness(self.applied_brightness());
    }

    fn leave(&mut self, portal: &mut impl Portal) {
        self.state = State::Active;
        portal.set_brightness(self.brightness);
    }

    fn applied_brightness(&self) -> u8 {
        match self.state {
            State::Active => self.brightness,
            State::Idle => {
                (self.brightness as u16 * self.config.brightness_pct.min(100) as u16 / 100) as u8
            }
        }
    }
}
