//! Photolink
//!
//! Receiver for a covert low-bandwidth optical channel: a blinking
//! light source encodes data in amplitude fluctuations, and this crate
//! recovers framing and characters from noisy, auto-exposed video with
//! no clock reference.
//!
//! # Architecture
//!
//! One tick per delivered frame, strictly in order:
//!
//! ```text
//! capture → signal (ROI sample → smooth → baseline → digitize)
//!         → decode (pulse classify → bit recovery → byte framing)
//! ```
//!
//! # Design Principles
//!
//! - **Best-effort, never fatal**: malformed bytes are dropped; the
//!   decoder runs indefinitely over a noisy channel
//! - **Tick-counted time**: pulse widths are measured in captured
//!   frames; there is no hidden clock
//! - **Hysteresis everywhere it matters**: the Schmitt trigger's dead
//!   zone is intentional noise immunity, not a bug
//!
//! # Example
//!
//! ```no_run
//! use photolink::{
//!     capture::{BlinkSource, CaptureConfig, DecoderConfig, FrameSource},
//!     pipeline::SignalPipeline,
//! };
//!
//! let mut source = BlinkSource::new(b"HELLO", 2);
//! source.open(&CaptureConfig::default()).unwrap();
//!
//! let mut pipeline = SignalPipeline::new(&DecoderConfig::default()).unwrap();
//!
//! for _ in 0..1000 {
//!     // A not-ready frame skips the tick without side effects.
//!     if let Some(frame) = source.next_frame().unwrap() {
//!         if let Some(event) = pipeline.process(&frame) {
//!             println!("{}", event);
//!         }
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod capture;
pub mod decode;
pub mod pipeline;
pub mod signal;

// Re-export commonly used types at crate root
pub use capture::{
    BlinkSource, CaptureConfig, ChannelMetric, DecoderConfig, FileConfig, Frame, FrameSource,
    SourceError,
};
pub use decode::{DecodedEvent, ManchesterDecoder, PulseClassifier, END_WORD, SYNC_WORD};
pub use pipeline::SignalPipeline;
pub use signal::{BaselineTracker, Digitizer, RoiSampler, Smoother};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
