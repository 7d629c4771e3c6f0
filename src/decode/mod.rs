//! Pulse classification and line decoding.
//!
//! Consumes the per-tick digital state stream and produces decoded
//! output events: run lengths become short/long pulses, pulses become
//! bits under the self-clocking line-code rules, and bits frame into
//! bytes gated to printable ASCII plus the reserved sync and end words.

mod event;
mod manchester;
mod pulse;

pub use event::DecodedEvent;
pub use manchester::{
    encode_levels, encode_transmission, ManchesterDecoder, END_WORD, SYNC_WORD, WAKE_BITS,
};
pub use pulse::{Pulse, PulseClassifier, PulseLevel, PulseWidth};
