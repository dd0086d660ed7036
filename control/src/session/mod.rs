//! Command session with the host, spoken over a serial link.
//!
//! Bytes are drained from the link once per tick and reassembled into
//! frames. Every frame is answered: valid commands with an ACK (or PONG for
//! a keepalive), rejected and corrupted ones with a NAK. The session also
//! owns the idle state machine, since both remote commands and user input
//! decide when idling ends.

pub mod console;
pub mod cue;
pub mod dispatch;
pub mod idle;
pub mod receiver;

use melody_protocol::{Frame, Response};

use self::dispatch::Rejection;
use self::idle::Idle;
use self::receiver::{Received, Receiver, Stats};
use crate::activity::ActivityClock;
use crate::config::SessionConfig;
use crate::log;
use crate::portal::Portal;
use crate::random::Random;
use crate::time::Instant;

/// Most bytes drained from the link during a single poll.
pub const DRAIN_LIMIT: usize = 64;

/// Serial port connecting the machine to the host.
pub trait Link {
    type Error;

    /// Read a byte if one is available, never blocking.
    fn read(&mut self) -> nb::Result<u8, Self::Error>;

    /// Queue bytes for sending. Fire-and-forget.
    fn write(&mut self, bytes: &[u8]);
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Session {
    receiver: Receiver,
    idle: Idle,
    stats: Stats,
    led_count: u8,
}

impl Session {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            receiver: Receiver::new(config.message_timeout),
            idle: Idle::new(config.idle),
            stats: Stats::default(),
            led_count: config.led_count,
        }
    }

    /// Drain available bytes from the link and answer completed frames.
    pub fn poll<L: Link>(
        &mut self,
        link: &mut L,
        portal: &mut impl Portal,
        clock: &mut ActivityClock,
        now: Instant,
    ) {
        self.receiver.expire(now, &mut self.stats);

        for _ in 0..DRAIN_LIMIT {
            let byte = match link.read() {
                Ok(byte) => byte,
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(_)) => {
                    log::warning!("Serial line error, dropping partial frame");
                    self.stats.line_errors = self.stats.line_errors.wrapping_add(1);
                    self.receiver.reset(&mut self.stats);
                    break;
                }
            };

            if let Some(received) = self.receiver.push(byte, now, &mut self.stats) {
                self.respond(received, link, portal, clock, now);
            }
        }
    }

    /// Advance the idle state machine.
    pub fn tick(
        &mut self,
        portal: &mut impl Portal,
        clock: &ActivityClock,
        random: &mut impl Random,
        now: Instant,
    ) {
        self.idle.tick(portal, clock, random, now);
    }

    /// Record user activity coming from the physical controls.
    pub fn set_activity(
        &mut self,
        portal: &mut impl Portal,
        clock: &mut ActivityClock,
        now: Instant,
    ) {
        self.idle.activity(portal, clock, now);
    }

    /// Send the current program to the host.
    pub fn report_status(&self, link: &mut impl Link, portal: &impl Portal) {
        let program = portal.program();
        log::info!(
            "Status: program {}, frame {=u32}, {} frames valid, {} invalid",
            program.name(),
            portal.frame_count(),
            self.stats.valid,
            self.stats.invalid
        );
        link.write(&Frame::response(Response::Status, program.id()).to_bytes());
    }

    #[must_use]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    #[must_use]
    pub fn idle(&self) -> &Idle {
        &self.idle
    }

    /// Number of bytes of a partial frame waiting for completion.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    #[cfg_attr(not(feature = "defmt"), allow(unused_variables))]
    fn respond(
        &mut self,
        received: Received,
        link: &mut impl Link,
        portal: &mut impl Portal,
        clock: &mut ActivityClock,
        now: Instant,
    ) {
        let reply = match received {
            Received::Valid(frame) => match self.dispatch(frame, portal, clock, now) {
                Ok(Response::Pong) => Frame::response(Response::Pong, 0),
                Ok(response) => Frame::response(response, frame.command),
                Err(rejection) => {
                    self.reject(rejection);
                    Frame::response(Response::Nak, frame.command)
                }
            },
            Received::Corrupted(frame) => {
                log::warning!(
                    "Checksum mismatch: {=u8:#x} ^ {=u8:#x} != {=u8:#x}",
                    frame.command,
                    frame.value,
                    frame.checksum
                );
                Frame::response(Response::Nak, 0)
            }
        };
        link.write(&reply.to_bytes());
    }

    #[cfg_attr(not(feature = "defmt"), allow(unused_variables))]
    fn reject(&mut self, rejection: Rejection) {
        log::warning!("Rejected command: {:?}", rejection);
        self.stats.rejected = self.stats.rejected.wrapping_add(1);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
