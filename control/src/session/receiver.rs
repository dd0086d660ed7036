//! Reassembly of frames from a noisy byte stream.

use heapless::Vec;
use melody_protocol::{decode, Frame, FRAME_LEN, START};

use crate::log;
use crate::time::{elapsed, Duration, Instant};

/// Size of the receive buffer in bytes.
pub const CAPACITY: usize = 16;

/// Counters of the receiving side, kept for diagnostics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stats {
    /// Bytes read from the link.
    pub received: u32,
    /// Frames with matching markers and checksum.
    pub valid: u32,
    /// Frames with matching markers but a wrong checksum.
    pub invalid: u32,
    /// Valid frames refused by the dispatcher.
    pub rejected: u32,
    /// Bytes thrown away while searching for a frame.
    pub discarded: u32,
    pub overflows: u32,
    pub timeouts: u32,
    /// Read failures reported by the link.
    pub line_errors: u32,
}

/// Outcome of a frame-sized chunk lifted from the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Received {
    Valid(Frame),
    Corrupted(Frame),
}

/// Bounded buffer collecting bytes until they form a frame.
///
/// The buffer is resolved after every byte, so it only ever holds a
/// start marker followed by less than a full frame. Anything preceding the
/// start marker is dropped and a start marker not followed by an end
/// marker four bytes later is taken for noise.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Receiver {
    buffer: Vec<u8, CAPACITY>,
    last_byte: Instant,
    timeout: Duration,
}

impl Receiver {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            buffer: Vec::new(),
            last_byte: Instant::from_ticks(0),
            timeout,
        }
    }

    /// Append a byte, returning a frame if one got completed by it.
    pub fn push(&mut self, byte: u8, now: Instant, stats: &mut Stats) -> Option<Received> {
        stats.received = stats.received.wrapping_add(1);
        self.last_byte = now;

        if self.buffer.push(byte).is_err() {
            log::warning!("Receive buffer overflow, dropping {=usize} bytes", self.buffer.len());
            stats.overflows = stats.overflows.wrapping_add(1);
            self.discard_all(stats);
            return None;
        }

        self.resolve(stats)
    }

    /// Drop a partial frame that stalled for longer than the timeout.
    ///
    /// Returns whether anything was dropped.
    pub fn expire(&mut self, now: Instant, stats: &mut Stats) -> bool {
        if self.buffer.is_empty() || elapsed(now, self.last_byte) <= self.timeout {
            return false;
        }

        log::warning!("Partial frame timed out after {=usize} bytes", self.buffer.len());
        stats.timeouts = stats.timeouts.wrapping_add(1);
        self.discard_all(stats);
        true
    }

    /// Drop whatever is buffered and start searching for a frame again.
    pub fn reset(&mut self, stats: &mut Stats) {
        self.discard_all(stats);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    fn resolve(&mut self, stats: &mut Stats) -> Option<Received> {
        loop {
            match self.buffer.iter().position(|&b| b == START) {
                None => {
                    self.discard_all(stats);
                    return None;
                }
                Some(0) => (),
                Some(offset) => self.discard(offset, stats),
            }

            if self.buffer.len() < FRAME_LEN {
                return None;
            }

            let mut bytes = [0; FRAME_LEN];
            bytes.copy_from_slice(&self.buffer[..FRAME_LEN]);
            let frame = decode(bytes);

            if !frame.has_markers() {
                // The start marker was noise, look for another one behind it.
                self.discard(1, stats);
                continue;
            }

            self.shift(FRAME_LEN);
            return Some(if frame.is_valid() {
                stats.valid = stats.valid.wrapping_add(1);
                Received::Valid(frame)
            } else {
                stats.invalid = stats.invalid.wrapping_add(1);
                Received::Corrupted(frame)
            });
        }
    }

    fn discard(&mut self, count: usize, stats: &mut Stats) {
        stats.discarded = stats.discarded.wrapping_add(count as u32);
        self.shift(count);
    }

    fn discard_all(&mut self, stats: &mut Stats) {
        let count = self.buffer.len();
        self.discard(count, stats);
    }

    fn shift(&mut self, count: usize) {
        let len = self.buffer.len();
        let count = count.min(len);
        self.buffer.copy_within(count.., 0);
        self.buffer.truncate(len - count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ms;
    use melody_protocol::encode;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const TIMEOUT: Duration = Duration::millis(100);

    fn feed(receiver: &mut Receiver, bytes: &[u8], stats: &mut Stats) -> Vec<Received, 8> {
        let mut received = Vec::new();
        for &byte in bytes {
            if let Some(frame) = receiver.push(byte, ms(0), stats) {
                received.push(frame).unwrap();
            }
        }
        received
    }

    #[test]
    fn when_valid_frame_arrives_it_is_received() {
        let mut receiver = Receiver::new(TIMEOUT);
        let mut stats = Stats::default();

        let received = feed(&mut receiver, &[0xAA, 0x01, 0x02, 0x03, 0x55], &mut stats);
        assert_eq!(received[..], [Received::Valid(decode(encode(0x01, 0x02)))]);
        assert!(receiver.is_empty());
        assert_eq!(stats.received, 5);
        assert_eq!(stats.valid, 1);
    }

    #[test]
    fn when_noise_precedes_frame_only_the_frame_is_received() {
        let mut receiver = Receiver::new(TIMEOUT);
        let mut stats = Stats::default();

        let mut bytes = std::vec![0x13, 0x55, 0x00, 0xFF, 0xAA];
        bytes.extend_from_slice(&encode(0x04, 0x80));
        let received = feed(&mut receiver, &bytes, &mut stats);

        assert_eq!(received[..], [Received::Valid(decode(encode(0x04, 0x80)))]);
        assert_eq!(stats.valid, 1);
        assert_eq!(stats.invalid, 0);
        assert_eq!(stats.discarded, 5);
        assert!(receiver.is_empty());
    }

    #[test]
    fn when_start_marker_is_false_it_resynchronizes_on_the_next_one() {
        let mut receiver = Receiver::new(TIMEOUT);
        let mut stats = Stats::default();

        // The first frame is cut short by the start of the second.
        let mut bytes = std::vec![0xAA, 0x02];
        bytes.extend_from_slice(&encode(0x05, 0x10));
        let received = feed(&mut receiver, &bytes, &mut stats);

        assert_eq!(received[..], [Received::Valid(decode(encode(0x05, 0x10)))]);
        assert_eq!(stats.discarded, 2);
    }

    #[test]
    fn when_checksum_is_wrong_frame_is_received_as_corrupted() {
        let mut receiver = Receiver::new(TIMEOUT);
        let mut stats = Stats::default();

        let received = feed(&mut receiver, &[0xAA, 0x01, 0x02, 0x07, 0x55], &mut stats);
        assert!(matches!(received[..], [Received::Corrupted(_)]));
        assert_eq!(stats.invalid, 1);
        assert!(receiver.is_empty());

        let received = feed(&mut receiver, &encode(0x01, 0x02), &mut stats);
        assert!(matches!(received[..], [Received::Valid(_)]));
    }

    #[test]
    fn when_partial_frame_stalls_it_is_dropped_after_timeout() {
        let mut receiver = Receiver::new(TIMEOUT);
        let mut stats = Stats::default();

        receiver.push(0xAA, ms(1000), &mut stats);
        receiver.push(0x01, ms(1010), &mut stats);
        assert!(!receiver.expire(ms(1110), &mut stats));
        assert_eq!(receiver.len(), 2);

        assert!(receiver.expire(ms(1111), &mut stats));
        assert!(receiver.is_empty());
        assert_eq!(stats.timeouts, 1);
        assert_eq!(stats.discarded, 2);
    }

    #[test]
    fn when_buffer_is_empty_timeout_does_nothing() {
        let mut receiver = Receiver::new(TIMEOUT);
        let mut stats = Stats::default();
        assert!(!receiver.expire(ms(5000), &mut stats));
        assert_eq!(stats.timeouts, 0);
    }

    #[test]
    fn when_reset_partial_frame_is_dropped() {
        let mut receiver = Receiver::new(TIMEOUT);
        let mut stats = Stats::default();
        feed(&mut receiver, &[0xAA, 0x01, 0x02], &mut stats);

        receiver.reset(&mut stats);
        assert!(receiver.is_empty());
        assert_eq!(stats.discarded, 3);
    }

    #[test]
    fn when_fed_random_bytes_it_never_exceeds_capacity() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut receiver = Receiver::new(TIMEOUT);
        let mut stats = Stats::default();

        for t in 0..1000 {
            let byte = if rng.gen_bool(0.2) { START } else { rng.gen() };
            receiver.push(byte, ms(t), &mut stats);
            assert!(receiver.len() <= CAPACITY);
            assert!(receiver.len() < FRAME_LEN);
        }
        assert_eq!(stats.received, 1000);
        assert_eq!(stats.overflows, 0);

        // Garbage never wedges the receiver.
        receiver.reset(&mut stats);
        let received = feed(&mut receiver, &encode(0x10, 0), &mut stats);
        assert!(matches!(received[..], [Received::Valid(_)]));
    }
}
