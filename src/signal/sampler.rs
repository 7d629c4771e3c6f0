//! Region-of-interest sampling.
//!
//! Reduces one captured frame to a single scalar. The reference metric
//! is the mean of (blue - green) over a centered square window, which
//! rejects common-mode brightness changes from auto exposure and
//! ambient drift.

use crate::capture::{ChannelMetric, Frame};

/// One scalar value derived from a single captured frame.
///
/// Immutable once produced; the sequence number ties it back to the
/// originating frame for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct FrameSample {
    /// The extracted channel metric.
    pub value: f64,
    /// Sequence number of the source frame.
    pub sequence: u64,
}

/// Extracts a scalar metric from a fixed central region of each frame.
///
/// Smaller windows increase susceptibility to sensor noise; larger
/// windows reduce responsiveness to fine spatial alignment errors.
#[derive(Debug, Clone)]
pub struct RoiSampler {
    roi_size: u32,
    metric: ChannelMetric,
}

impl RoiSampler {
    /// Creates a sampler with the given window side length and metric.
    pub fn new(roi_size: u32, metric: ChannelMetric) -> Self {
        Self {
            roi_size: roi_size.max(1),
            metric,
        }
    }

    /// Returns the configured window side length.
    pub fn roi_size(&self) -> u32 {
        self.roi_size
    }

    /// Computes the metric over the central window of `frame`.
    ///
    /// Returns `None` for malformed frames (pixel buffer inconsistent
    /// with the stated dimensions); the caller skips the tick.
    pub fn sample(&self, frame: &Frame) -> Option<FrameSample> {
        if !frame.is_valid() || frame.pixel_count() == 0 {
            tracing::warn!(
                sequence = frame.sequence(),
                "skipping malformed frame"
            );
            return None;
        }

        // Clamp the window to the frame bounds.
        let side_x = self.roi_size.min(frame.width());
        let side_y = self.roi_size.min(frame.height());
        let x0 = (frame.width() - side_x) / 2;
        let y0 = (frame.height() - side_y) / 2;

        let mut sum = 0.0;
        for y in y0..y0 + side_y {
            for x in x0..x0 + side_x {
                let (r, g, b) = frame.rgb_at(x, y);
                sum += match self.metric {
                    ChannelMetric::BlueMinusGreen => f64::from(b) - f64::from(g),
                    ChannelMetric::Luma => {
                        0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)
                    }
                };
            }
        }

        let value = sum / f64::from(side_x * side_y);
        Some(FrameSample {
            value,
            sequence: frame.sequence(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(r: u8, g: u8, b: u8) -> Frame {
        let mut pixels = Vec::with_capacity(16 * 16 * 3);
        for _ in 0..16 * 16 {
            pixels.extend_from_slice(&[r, g, b]);
        }
        Frame::new(pixels, 16, 16, 1)
    }

    #[test]
    fn test_blue_minus_green() {
        let sampler = RoiSampler::new(8, ChannelMetric::BlueMinusGreen);
        let frame = solid_frame(80, 50, 120);

        let sample = sampler.sample(&frame).unwrap();
        assert!((sample.value - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_common_mode_rejection() {
        let sampler = RoiSampler::new(8, ChannelMetric::BlueMinusGreen);

        let dim = sampler.sample(&solid_frame(10, 50, 90)).unwrap();
        let bright = sampler.sample(&solid_frame(110, 150, 190)).unwrap();

        // Equal brightness offsets on all channels cancel out.
        assert!((dim.value - bright.value).abs() < 1e-9);
    }

    #[test]
    fn test_luma_metric() {
        let sampler = RoiSampler::new(8, ChannelMetric::Luma);
        let frame = solid_frame(100, 100, 100);

        let sample = sampler.sample(&frame).unwrap();
        assert!((sample.value - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_roi_clamped_to_frame() {
        // Window larger than the frame: clamp, do not panic.
        let sampler = RoiSampler::new(50, ChannelMetric::BlueMinusGreen);
        let frame = solid_frame(0, 10, 30);

        let sample = sampler.sample(&frame).unwrap();
        assert!((sample.value - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_frame_skipped() {
        let sampler = RoiSampler::new(8, ChannelMetric::BlueMinusGreen);
        let frame = Frame::new(vec![0u8; 10], 16, 16, 1);

        assert!(sampler.sample(&frame).is_none());
    }
}
