//! Self-clocking bit and byte recovery.
//!
//! A logical bit is carried by a pair of short pulses at opposite
//! levels; when the run that would carry two adjacent short pulses
//! collapses into one sustained level, the resulting long pulse carries
//! the bit directly at its own level. Bits accumulate MSB-first into
//! bytes; two byte values are reserved as framing words and everything
//! else passes a printable-ASCII gate.
//!
//! The decoder has no fatal states: malformed bytes are dropped and it
//! runs indefinitely over a noisy channel.

use super::event::DecodedEvent;
use super::pulse::{Pulse, PulseLevel, PulseWidth};

/// Reserved synchronization word; emitted as a lock marker, never data.
pub const SYNC_WORD: u8 = 0b1111_0000;

/// Reserved end-of-transmission word.
pub const END_WORD: u8 = 0b0000_1111;

/// Number of wake bits (all ones) prepended to a transmission.
///
/// The idle-to-carrier transition hands the decoder one spurious zero
/// bit from the long idle-low run. Seven wake ones fill the rest of
/// that first byte, producing 0x7F, which the printable gate silently
/// discards and which leaves the sync word byte-aligned.
pub const WAKE_BITS: usize = 7;

/// Reconstructs bits, bytes and characters from classified pulses.
#[derive(Debug, Clone, Default)]
pub struct ManchesterDecoder {
    /// Unpaired short pulse waiting for its other half.
    pending: Option<PulseLevel>,
    /// Accumulated bits, MSB-first.
    bits: u8,
    /// Number of bits currently accumulated (0..=7).
    bit_count: u8,
}

impl ManchesterDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one classified pulse; returns an event on a full byte.
    pub fn push(&mut self, pulse: Pulse) -> Option<DecodedEvent> {
        match pulse.width {
            PulseWidth::Long => {
                // A sustained level crossing a bit boundary carries the
                // bit directly; any unpaired half is stale and dropped.
                self.pending = None;
                self.push_bit(pulse.level == PulseLevel::High)
            }
            PulseWidth::Short => match self.pending {
                Some(p) if p != pulse.level => {
                    // low-then-high resolves to 0, high-then-low to 1.
                    self.pending = None;
                    self.push_bit(p == PulseLevel::High)
                }
                _ => {
                    self.pending = Some(pulse.level);
                    None
                }
            },
        }
    }

    /// Number of bits currently pending in the accumulator.
    pub fn accumulated_bits(&self) -> u8 {
        self.bit_count
    }

    /// Returns true if a short pulse is waiting for its pair.
    pub fn has_pending_pulse(&self) -> bool {
        self.pending.is_some()
    }

    /// Clears pending pulse and accumulator, as on a source change.
    pub fn reset(&mut self) {
        self.pending = None;
        self.bits = 0;
        self.bit_count = 0;
    }

    fn push_bit(&mut self, bit: bool) -> Option<DecodedEvent> {
        self.bits = (self.bits << 1) | u8::from(bit);
        self.bit_count += 1;

        if self.bit_count < 8 {
            return None;
        }

        // The accumulator never holds more than one framing unit and is
        // cleared after every full byte, never realigned mid-byte.
        let byte = self.bits;
        self.bits = 0;
        self.bit_count = 0;

        match byte {
            SYNC_WORD => {
                tracing::debug!("sync word recognized");
                Some(DecodedEvent::Lock)
            }
            END_WORD => {
                tracing::debug!("end word recognized");
                Some(DecodedEvent::End)
            }
            32..=126 => Some(DecodedEvent::Character(char::from(byte))),
            _ => {
                tracing::trace!(byte, "discarding non-printable byte");
                None
            }
        }
    }
}

/// Expands bits into a per-tick level sequence, MSB-first per byte.
///
/// A bit whose successor differs is emitted as one long run at the
/// bit's level; a bit whose successor matches (or the final bit) is
/// emitted as the short pair. This produces strictly alternating runs
/// and is the exact inverse of the decode rules above. One trailing
/// half-bit at the opposite level is appended so the final run is
/// classifiable.
pub fn encode_levels(bytes: &[u8], half_bit_ticks: u32) -> Vec<bool> {
    let bits = bytes_to_bits(bytes);
    let mut levels = bit_levels(&bits, half_bit_ticks);
    append_release(&mut levels, half_bit_ticks);
    levels
}

/// Builds the level sequence for a complete transmission:
/// wake bits, sync word, payload, end word.
pub fn encode_transmission(payload: &[u8], half_bit_ticks: u32) -> Vec<bool> {
    let mut bits = vec![true; WAKE_BITS];
    bits.extend(bytes_to_bits(&[SYNC_WORD]));
    bits.extend(bytes_to_bits(payload));
    bits.extend(bytes_to_bits(&[END_WORD]));

    let mut levels = bit_levels(&bits, half_bit_ticks);
    append_release(&mut levels, half_bit_ticks);
    levels
}

fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1 == 1);
        }
    }
    bits
}

fn bit_levels(bits: &[bool], half_bit_ticks: u32) -> Vec<bool> {
    let half = half_bit_ticks.max(1) as usize;
    let mut levels = Vec::with_capacity(bits.len() * half * 2);

    for (i, &bit) in bits.iter().enumerate() {
        let next_differs = bits.get(i + 1).is_some_and(|&n| n != bit);
        if next_differs {
            // Long run at the bit's level.
            levels.extend(std::iter::repeat(bit).take(half * 2));
        } else {
            // Short pair: the bit's level, then its complement.
            levels.extend(std::iter::repeat(bit).take(half));
            levels.extend(std::iter::repeat(!bit).take(half));
        }
    }
    levels
}

fn append_release(levels: &mut Vec<bool>, half_bit_ticks: u32) {
    if let Some(&last) = levels.last() {
        let half = half_bit_ticks.max(1) as usize;
        levels.extend(std::iter::repeat(!last).take(half));
    }
}
