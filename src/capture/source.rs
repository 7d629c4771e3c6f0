//! Frame source abstraction.
//!
//! This module provides a trait-based abstraction over the video feed,
//! allowing for both real capture input and mock implementations for
//! testing. Device acquisition itself is an external collaborator; the
//! pipeline only consumes frames through this boundary.

use super::{CaptureConfig, Frame};
use crate::decode::encode_transmission;
use thiserror::Error;

/// Errors that can occur during source operations.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("capture device not found: {0}")]
    DeviceNotFound(String),
    #[error("failed to open source: {0}")]
    OpenFailed(String),
    #[error("failed to deliver frame: {0}")]
    DeliveryFailed(String),
    #[error("source not initialized")]
    NotInitialized,
}

/// Trait for frame source implementations.
///
/// `next_frame` returns `Ok(None)` when no frame is ready yet; the
/// caller skips the tick without side effects. Replacing a source is a
/// normal lifecycle event: the caller opens the new source and resets
/// the pipeline, since baseline and framing continuity do not hold
/// across physical scenes.
pub trait FrameSource {
    /// Opens and initializes the source with the given configuration.
    fn open(&mut self, config: &CaptureConfig) -> Result<(), SourceError>;

    /// Delivers the next frame, or `None` if not ready.
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError>;

    /// Checks if the source is currently open.
    fn is_open(&self) -> bool;

    /// Closes the source and releases resources.
    fn close(&mut self);
}

/// Mock source that renders a Manchester-encoded payload as a blinking
/// region in synthetic frames.
///
/// The blink alternates the blue and green channels inside a centered
/// square, so the blue-minus-green metric sees a symmetric bipolar
/// swing while mean brightness stays constant. A configurable number of
/// dark idle frames precedes the transmission, and the source idles
/// dark again once the payload is exhausted.
pub struct BlinkSource {
    config: Option<CaptureConfig>,
    /// Level per tick for the whole transmission.
    levels: Vec<bool>,
    payload: Vec<u8>,
    half_bit_ticks: u32,
    /// Dark frames emitted before the transmission starts.
    idle_frames: u32,
    /// `Ok(None)` deliveries before the first real frame.
    warmup: u32,
    cursor: usize,
    sequence: u64,
    /// Channel swing in 8-bit counts.
    amplitude: u8,
}

impl BlinkSource {
    /// Default number of dark frames before the transmission.
    pub const DEFAULT_IDLE_FRAMES: u32 = 30;

    /// Creates a source transmitting `payload` at the given half-bit width.
    pub fn new(payload: &[u8], half_bit_ticks: u32) -> Self {
        Self {
            config: None,
            levels: encode_transmission(payload, half_bit_ticks),
            payload: payload.to_vec(),
            half_bit_ticks,
            idle_frames: Self::DEFAULT_IDLE_FRAMES,
            warmup: 0,
            cursor: 0,
            sequence: 0,
            amplitude: 60,
        }
    }

    /// Sets the number of not-ready deliveries before the first frame.
    pub fn with_warmup(mut self, warmup: u32) -> Self {
        self.warmup = warmup;
        self
    }

    /// Sets the number of dark idle frames before the transmission.
    pub fn with_idle_frames(mut self, idle_frames: u32) -> Self {
        self.idle_frames = idle_frames;
        self
    }

    /// Total frames the transmission occupies, excluding idle and warmup.
    pub fn transmission_frames(&self) -> usize {
        self.levels.len()
    }

    /// Returns true once the payload has been fully rendered.
    pub fn exhausted(&self) -> bool {
        self.cursor >= self.idle_frames as usize + self.levels.len()
    }

    fn render(&self, config: &CaptureConfig, level: Option<bool>) -> Frame {
        let w = config.width;
        let h = config.height;
        let mut pixels = vec![0u8; (w as usize) * (h as usize) * 3];

        // Blink square: centered, half the short frame dimension.
        let side = (w.min(h) / 2).max(1);
        let x0 = (w - side) / 2;
        let y0 = (h - side) / 2;

        let mut idx = 0;
        for y in 0..h {
            for x in 0..w {
                // Deterministic common-mode jitter; identical across
                // channels so differencing cancels it exactly.
                let jitter =
                    ((x as u64 * 31 + y as u64 * 17 + self.sequence * 13) % 5) as u8;
                let base = 80u8 + jitter;
                let mut g = base;
                let mut b = base;

                let in_square = x >= x0 && x < x0 + side && y >= y0 && y < y0 + side;
                if in_square {
                    match level {
                        Some(true) => b = b.saturating_add(self.amplitude),
                        Some(false) => g = g.saturating_add(self.amplitude),
                        None => {}
                    }
                }

                pixels[idx] = base;
                pixels[idx + 1] = g;
                pixels[idx + 2] = b;
                idx += 3;
            }
        }

        Frame::new(pixels, w, h, self.sequence)
    }
}

impl std::fmt::Debug for BlinkSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlinkSource")
            .field("payload_bytes", &self.payload.len())
            .field("half_bit_ticks", &self.half_bit_ticks)
            .field("transmission_frames", &self.levels.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl FrameSource for BlinkSource {
    fn open(&mut self, config: &CaptureConfig) -> Result<(), SourceError> {
        config
            .validate()
            .map_err(|e| SourceError::OpenFailed(e.to_string()))?;
        self.config = Some(config.clone());
        self.cursor = 0;
        self.sequence = 0;
        tracing::info!(
            payload_bytes = self.payload.len(),
            transmission_frames = self.levels.len(),
            "BlinkSource opened"
        );
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError> {
        let config = self
            .config
            .as_ref()
            .ok_or(SourceError::NotInitialized)?
            .clone();

        if self.warmup > 0 {
            self.warmup -= 1;
            return Ok(None);
        }

        let idle = self.idle_frames as usize;
        let level = if self.cursor < idle {
            None
        } else {
            self.levels.get(self.cursor - idle).copied()
        };

        let frame = self.render(&config, level);
        self.cursor += 1;
        self.sequence += 1;
        Ok(Some(frame))
    }

    fn is_open(&self) -> bool {
        self.config.is_some()
    }

    fn close(&mut self) {
        self.config = None;
        tracing::info!("BlinkSource closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_lifecycle() {
        let mut source = BlinkSource::new(b"A", 2).with_idle_frames(0);
        let config = CaptureConfig::with_dimensions(64, 48);

        assert!(!source.is_open());

        source.open(&config).unwrap();
        assert!(source.is_open());

        let frame = source.next_frame().unwrap().unwrap();
        assert!(frame.is_valid());
        assert_eq!(frame.sequence(), 0);

        let frame2 = source.next_frame().unwrap().unwrap();
        assert_eq!(frame2.sequence(), 1);

        source.close();
        assert!(!source.is_open());
    }

    #[test]
    fn test_frame_without_open() {
        let mut source = BlinkSource::new(b"A", 2);
        assert!(matches!(
            source.next_frame(),
            Err(SourceError::NotInitialized)
        ));
    }

    #[test]
    fn test_warmup_delivers_not_ready() {
        let mut source = BlinkSource::new(b"A", 2).with_warmup(2);
        source.open(&CaptureConfig::with_dimensions(64, 48)).unwrap();

        assert!(source.next_frame().unwrap().is_none());
        assert!(source.next_frame().unwrap().is_none());
        assert!(source.next_frame().unwrap().is_some());
    }

    #[test]
    fn test_blink_modulates_blue_and_green() {
        // No idle frames: the first rendered frame carries the first
        // transmitted level, which is high (wake bits start high).
        let mut source = BlinkSource::new(b"A", 2).with_idle_frames(0);
        let config = CaptureConfig::with_dimensions(64, 64);
        source.open(&config).unwrap();

        let frame = source.next_frame().unwrap().unwrap();
        let (_, g, b) = frame.rgb_at(32, 32);
        assert!(b > g, "high level should raise blue above green");
    }

    #[test]
    fn test_idle_frame_is_balanced() {
        let mut source = BlinkSource::new(b"A", 2).with_idle_frames(5);
        let config = CaptureConfig::with_dimensions(64, 64);
        source.open(&config).unwrap();

        let frame = source.next_frame().unwrap().unwrap();
        let (_, g, b) = frame.rgb_at(32, 32);
        assert_eq!(b, g, "idle frames carry no channel difference");
    }
}
