//! The whole per-tick pipeline, from raw inputs and serial bytes to events
//! and portal parameters.

use crate::config::Config;
use crate::input::snapshot::Snapshot as InputSnapshot;
use crate::input::store::Store as Input;
use crate::log;
use crate::mapper::{Mapper, Transport};
use crate::portal::Portal;
use crate::random::Random;
use crate::session::console::Reply;
use crate::session::receiver::Stats;
use crate::session::{Link, Session};
use crate::time::{Duration, Instant};

/// Liveness summary, meant to be reported about once a second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Heartbeat {
    /// No input changed for longer than the idle timeout.
    pub idle: bool,
    pub since_activity: Duration,
}

/// The main store of conditioned inputs and of the command session.
///
/// This struct is the central piece of the control module. It takes
/// `InputSnapshot` on its inputs, turns committed changes into output
/// events, executes commands arriving over the serial link and keeps track
/// of idling. The caller drives it once per tick, passing the same instant
/// to every step of that tick.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Store {
    input: Input,
    mapper: Mapper,
    session: Session,
}

impl Store {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            input: Input::new(config.input),
            mapper: Mapper::new(),
            session: Session::new(config.session),
        }
    }

    /// Run all steps of a single tick in order.
    ///
    /// An edge detected on the inputs is turned into an event within the
    /// same tick, and commands are dispatched before the caller renders.
    pub fn tick(
        &mut self,
        snapshot: &InputSnapshot,
        transport: &mut impl Transport,
        link: &mut impl Link,
        portal: &mut impl Portal,
        random: &mut impl Random,
        now: Instant,
    ) {
        self.apply_input_snapshot(snapshot, transport, portal, now);
        self.process_serial(link, portal, random, now);
    }

    /// Condition raw inputs and emit events for what changed.
    ///
    /// Returns whether any input changed, which also ends idling.
    pub fn apply_input_snapshot(
        &mut self,
        snapshot: &InputSnapshot,
        transport: &mut impl Transport,
        portal: &mut impl Portal,
        now: Instant,
    ) -> bool {
        let active = self.input.update(snapshot, now);
        self.mapper.map(&self.input, transport);
        if active {
            self.session
                .set_activity(portal, self.input.activity_mut(), now);
        }
        active
    }

    /// Execute commands waiting on the link and advance idling.
    pub fn process_serial(
        &mut self,
        link: &mut impl Link,
        portal: &mut impl Portal,
        random: &mut impl Random,
        now: Instant,
    ) {
        self.session
            .poll(link, portal, self.input.activity_mut(), now);
        self.session
            .tick(portal, self.input.activity(), random, now);
    }

    /// Apply a cue of the legacy indexed surface.
    pub fn apply_cue(
        &mut self,
        index: u8,
        value: u8,
        portal: &mut impl Portal,
        now: Instant,
    ) -> bool {
        self.session
            .apply_cue(index, value, portal, self.input.activity_mut(), now)
    }

    /// Execute a line typed into the text console.
    pub fn apply_console(
        &mut self,
        line: &str,
        link: &mut impl Link,
        portal: &mut impl Portal,
        now: Instant,
    ) -> Reply {
        self.session
            .apply_console(line, link, portal, self.input.activity_mut(), now)
    }

    /// Summarize whether anybody plays, logging it.
    pub fn heartbeat(&self, now: Instant) -> Heartbeat {
        let heartbeat = Heartbeat {
            idle: self.input.is_idle(now),
            since_activity: self.input.time_since_activity(now),
        };
        if heartbeat.idle {
            log::info!(
                "Heartbeat: idle, no activity for {=u64} ms",
                heartbeat.since_activity.to_millis()
            );
        } else {
            log::info!(
                "Heartbeat: active, last activity {=u64} ms ago",
                heartbeat.since_activity.to_millis()
            );
        }
        heartbeat
    }

    pub fn report_status(&self, link: &mut impl Link, portal: &impl Portal) {
        self.session.report_status(link, portal);
    }

    /// Conditioned inputs, for reading only.
    #[must_use]
    pub fn input(&self) -> &Input {
        &self.input
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn stats(&self) -> Stats {
        self.session.stats()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.session.idle().is_idle()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
