//! Decoded output events.

/// One externally visible output of the line decoder.
///
/// Events are emitted in strict tick order, one at a time, and are
/// never mutated after emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedEvent {
    /// A printable ASCII character recovered from one byte.
    Character(char),
    /// The reserved sync word was recognized; framing is aligned.
    Lock,
    /// The reserved end word was recognized; the transmission is over.
    End,
}

impl std::fmt::Display for DecodedEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodedEvent::Character(c) => write!(f, "'{}'", c),
            DecodedEvent::Lock => write!(f, "<lock>"),
            DecodedEvent::End => write!(f, "<end>"),
        }
    }
}
