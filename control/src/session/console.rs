//! Text commands typed into a serial console by a person.
//!
//! Lines have the form `portal <command> [argument]`, matched without
//! regard to case. Arguments outside of their range are ignored, the same
//! as lines that do not parse.

use melody_protocol::scale::{TEMPO_MAX, TEMPO_MIN};
use melody_protocol::Program;

use super::{Link, Session};
use crate::activity::ActivityClock;
use crate::log;
use crate::portal::Portal;
use crate::time::Instant;

/// Lines describing the accepted commands, printed on `portal help`.
pub const HELP: [&str; 5] = [
    "portal program <0-9>",
    "portal bpm <60-180>",
    "portal intensity <0.0-1.0>",
    "portal flash",
    "portal status",
];

const PREFIX: &str = "portal";

/// What a console line did, for the caller to echo back.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    Program(Program),
    Tempo(f32),
    Intensity(f32),
    Flash,
    /// Status frame was written to the link.
    Status,
    /// Caller should print [`HELP`].
    Help,
    Ignored,
}

impl Session {
    /// Execute a single console line.
    ///
    /// Selecting a program counts as deliberate remote control, the same
    /// as the binary command.
    pub fn apply_console(
        &mut self,
        line: &str,
        link: &mut impl Link,
        portal: &mut impl Portal,
        clock: &mut ActivityClock,
        now: Instant,
    ) -> Reply {
        let mut words = line.split_ascii_whitespace();
        if !words.next().is_some_and(|w| w.eq_ignore_ascii_case(PREFIX)) {
            return Reply::Ignored;
        }
        let (Some(command), argument, None) = (words.next(), words.next(), words.next()) else {
            return Reply::Ignored;
        };
        let is = |name: &str| command.eq_ignore_ascii_case(name);

        let reply = match argument {
            Some(argument) if is("program") => match argument.parse::<u8>() {
                Ok(id) => match Program::try_from(id) {
                    Ok(program) => {
                        self.idle.select(program, portal, clock, now);
                        Reply::Program(program)
                    }
                    Err(_) => Reply::Ignored,
                },
                Err(_) => Reply::Ignored,
            },
            Some(argument) if is("bpm") => match argument.parse::<f32>() {
                Ok(bpm) if (TEMPO_MIN..=TEMPO_MAX).contains(&bpm) => {
                    portal.set_tempo(bpm);
                    Reply::Tempo(bpm)
                }
                _ => Reply::Ignored,
            },
            Some(argument) if is("intensity") => match argument.parse::<f32>() {
                Ok(intensity) if (0.0..=1.0).contains(&intensity) => {
                    portal.set_intensity(intensity);
                    Reply::Intensity(intensity)
                }
                _ => Reply::Ignored,
            },
            None if is("flash") => {
                portal.flash();
                Reply::Flash
            }
            None if is("status") => {
                self.report_status(link, &*portal);
                Reply::Status
            }
            None if is("help") => Reply::Help,
            _ => Reply::Ignored,
        };

        if reply == Reply::Ignored {
            log::debug!("Ignoring console line");
        }
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::Parameters;
    use crate::time::ms;
    use melody_protocol::encode;

    #[derive(Default)]
    struct LinkStub {
        outgoing: std::vec::Vec<u8>,
    }

    impl Link for LinkStub {
        type Error = ();

        fn read(&mut self) -> nb::Result<u8, ()> {
            Err(nb::Error::WouldBlock)
        }

        fn write(&mut self, bytes: &[u8]) {
            self.outgoing.extend_from_slice(bytes);
        }
    }

    #[derive(Default)]
    struct Fixture {
        session: Session,
        link: LinkStub,
        parameters: Parameters,
        clock: ActivityClock,
    }

    impl Fixture {
        fn type_line(&mut self, line: &str, now: u32) -> Reply {
            self.session.apply_console(
                line,
                &mut self.link,
                &mut self.parameters,
                &mut self.clock,
                ms(now),
            )
        }
    }

    #[test]
    fn when_program_is_typed_it_is_selected_as_activity() {
        let mut fixture = Fixture::default();
        assert_eq!(
            fixture.type_line("portal program 8", 500),
            Reply::Program(Program::Plasma)
        );
        assert_eq!(fixture.parameters.program, Program::Plasma);
        assert_eq!(fixture.clock.last(), ms(500));
    }

    #[test]
    fn given_idle_typed_program_ends_idling() {
        let mut fixture = Fixture::default();
        fixture.session.tick(
            &mut fixture.parameters,
            &fixture.clock,
            &mut ZeroRandom,
            ms(30_001),
        );
        assert!(fixture.session.idle().is_idle());

        fixture.type_line("portal program 1", 31_000);
        assert!(!fixture.session.idle().is_idle());
        assert_eq!(fixture.parameters.program, Program::Pulse);
    }

    struct ZeroRandom;

    impl crate::random::Random for ZeroRandom {
        fn normal(&mut self) -> f32 {
            0.0
        }
    }

    #[test]
    fn lines_are_matched_regardless_of_case_and_spacing() {
        let mut fixture = Fixture::default();
        assert_eq!(
            fixture.type_line("  PORTAL   Bpm 90.5 \r\n", 0),
            Reply::Tempo(90.5)
        );
        assert_relative_eq!(fixture.parameters.tempo, 90.5);
        assert_eq!(
            fixture.type_line("portal intensity 0.25", 0),
            Reply::Intensity(0.25)
        );
        assert_relative_eq!(fixture.parameters.intensity, 0.25);
    }

    #[test]
    fn when_argument_is_out_of_range_nothing_changes() {
        let mut fixture = Fixture::default();
        let before = fixture.parameters;
        for line in [
            "portal program 10",
            "portal program -1",
            "portal program",
            "portal bpm 59.9",
            "portal bpm 181",
            "portal bpm NaN",
            "portal intensity 1.5",
            "portal intensity -0.1",
            "portal program 3 4",
            "portal dance",
            "portl program 3",
            "",
        ] {
            assert_eq!(fixture.type_line(line, 100), Reply::Ignored, "{line}");
        }
        assert_eq!(fixture.parameters, before);
        assert_eq!(fixture.clock.last(), ms(0));
    }

    #[test]
    fn range_limits_themselves_are_accepted() {
        let mut fixture = Fixture::default();
        assert_eq!(fixture.type_line("portal bpm 60", 0), Reply::Tempo(60.0));
        assert_eq!(fixture.type_line("portal bpm 180", 0), Reply::Tempo(180.0));
        assert_eq!(
            fixture.type_line("portal intensity 1.0", 0),
            Reply::Intensity(1.0)
        );
        assert_eq!(
            fixture.type_line("portal program 0", 0),
            Reply::Program(Program::Spiral)
        );
    }

    #[test]
    fn when_flash_is_typed_it_fires() {
        let mut fixture = Fixture::default();
        assert_eq!(fixture.type_line("portal flash", 0), Reply::Flash);
        assert!(fixture.parameters.take_flash());
        assert_eq!(fixture.type_line("portal flash now", 0), Reply::Ignored);
    }

    #[test]
    fn when_status_is_typed_status_frame_is_sent() {
        let mut fixture = Fixture::default();
        assert_eq!(fixture.type_line("portal status", 0), Reply::Status);
        assert_eq!(fixture.link.outgoing, encode(0x23, Program::Ambient.id()));
    }

    #[test]
    fn when_help_is_typed_it_asks_for_help_text() {
        let mut fixture = Fixture::default();
        assert_eq!(fixture.type_line("Portal HELP", 0), Reply::Help);
        assert!(HELP.iter().all(|line| line.starts_with(PREFIX)));
    }
}
