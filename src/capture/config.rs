//! Capture and decoder configuration.
//!
//! The decoder's notion of pulse width is tick-counted in captured
//! frames, so the frame rate and the ticks-per-half-bit constant are
//! configuration, not something inferred from the signal.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the video source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Camera device index or identifier.
    pub device_id: u32,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Target frames per second.
    pub fps: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device_id: 0,
            width: 640,
            height: 480,
            fps: 30,
        }
    }
}

impl CaptureConfig {
    /// Creates a new configuration with the specified dimensions.
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if self.fps == 0 || self.fps > 120 {
            return Err(ConfigError::InvalidFrameRate);
        }
        Ok(())
    }
}

/// Channel metric used by the ROI sampler.
///
/// Blue-minus-green differencing rejects common-mode brightness changes
/// (auto exposure, ambient drift). Mean luma conflates true signal with
/// ambient brightness and is strictly inferior for differencing-based
/// signaling; it is kept as a fallback for monochrome sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelMetric {
    /// Mean of (blue - green) over the ROI.
    BlueMinusGreen,
    /// Mean luma (BT.601 weights) over the ROI.
    Luma,
}

/// Tunable parameters of the decode pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Side length of the square sampling window at the frame center.
    pub roi_size: u32,
    /// Channel metric for ROI sampling.
    pub channel_metric: ChannelMetric,
    /// Moving-average window in frames. Must stay small relative to the
    /// minimum pulse width or it smears pulse edges.
    pub smoothing_window: usize,
    /// Baseline IIR coefficient; close to 1 so the baseline tracks only
    /// slow drift, not the modulated signal.
    pub baseline_alpha: f64,
    /// Frames per logical half-bit.
    pub half_bit_ticks: u32,
    /// Run lengths at or above this many frames classify as long pulses.
    pub long_cutoff: u32,
    /// Amplification applied to the AC component before digitization.
    pub gain: f64,
    /// Hysteresis half-width of the Schmitt trigger.
    pub threshold: f64,
    /// Capacity of the diagnostic trace buffer.
    pub trace_capacity: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            roi_size: 50,
            channel_metric: ChannelMetric::BlueMinusGreen,
            smoothing_window: 3,
            baseline_alpha: 0.97,
            half_bit_ticks: 2,
            long_cutoff: 4,
            gain: 8.0,
            threshold: 1.0,
            trace_capacity: 512,
        }
    }
}

impl DecoderConfig {
    /// Validates the decoder parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roi_size == 0 {
            return Err(ConfigError::InvalidRoi);
        }
        if self.smoothing_window == 0 {
            return Err(ConfigError::InvalidSmoothingWindow);
        }
        if !(self.baseline_alpha > 0.0 && self.baseline_alpha < 1.0) {
            return Err(ConfigError::InvalidAlpha(self.baseline_alpha));
        }
        if self.half_bit_ticks == 0 {
            return Err(ConfigError::InvalidHalfBit);
        }
        if self.long_cutoff <= self.half_bit_ticks {
            return Err(ConfigError::InvalidLongCutoff);
        }
        if !(self.gain > 0.0 && self.gain.is_finite()) {
            return Err(ConfigError::InvalidGain(self.gain));
        }
        if !(self.threshold > 0.0 && self.threshold.is_finite()) {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        if self.trace_capacity == 0 {
            return Err(ConfigError::InvalidTraceCapacity);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid frame dimensions")]
    InvalidDimensions,
    #[error("invalid frame rate (must be 1-120 fps)")]
    InvalidFrameRate,
    #[error("ROI size must be at least 1 pixel")]
    InvalidRoi,
    #[error("smoothing window must be at least 1 frame")]
    InvalidSmoothingWindow,
    #[error("baseline alpha {0} outside (0, 1)")]
    InvalidAlpha(f64),
    #[error("half-bit width must be at least 1 frame")]
    InvalidHalfBit,
    #[error("long-pulse cutoff must exceed the half-bit width")]
    InvalidLongCutoff,
    #[error("gain {0} must be positive and finite")]
    InvalidGain(f64),
    #[error("threshold {0} must be positive and finite")]
    InvalidThreshold(f64),
    #[error("trace capacity must be at least 1")]
    InvalidTraceCapacity,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub decoder: DecoderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Run continuously (true) or process a fixed number of frames (false).
    pub continuous: bool,
    /// Number of frames to process if not continuous.
    pub frame_count: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            continuous: false,
            frame_count: 2000,
        }
    }
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.capture.validate()?;
        config.decoder.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs_valid() {
        assert!(CaptureConfig::default().validate().is_ok());
        assert!(DecoderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_dimensions_invalid() {
        let mut config = CaptureConfig::default();
        config.width = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimensions)
        ));
    }

    #[test]
    fn test_negative_gain_invalid() {
        let mut config = DecoderConfig::default();
        config.gain = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidGain(_))));
    }

    #[test]
    fn test_zero_threshold_invalid() {
        let mut config = DecoderConfig::default();
        config.threshold = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_alpha_bounds() {
        let mut config = DecoderConfig::default();
        config.baseline_alpha = 1.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidAlpha(_))));

        config.baseline_alpha = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidAlpha(_))));
    }

    #[test]
    fn test_cutoff_must_exceed_half_bit() {
        let mut config = DecoderConfig::default();
        config.long_cutoff = config.half_bit_ticks;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLongCutoff)
        ));
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [capture]
            device_id = 1
            width = 320
            height = 240
            fps = 60

            [decoder]
            roi_size = 40
            channel_metric = "luma"
            smoothing_window = 3
            baseline_alpha = 0.95
            half_bit_ticks = 2
            long_cutoff = 4
            gain = 10.0
            threshold = 0.5
            trace_capacity = 256
        "#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.capture.width, 320);
        assert_eq!(config.decoder.channel_metric, ChannelMetric::Luma);
        assert!(config.decoder.validate().is_ok());
    }
}
