//! Video input and frame handling.
//!
//! This module provides abstractions for obtaining frames from a video
//! feed and for configuration. The feed is treated as an opaque stream
//! of pixel buffers; device enumeration and acquisition live outside
//! the crate, behind the [`FrameSource`] trait.

mod config;
mod frame;
mod source;

pub use config::{
    CaptureConfig, ChannelMetric, ConfigError, DecoderConfig, FileConfig, OutputConfig,
};
pub use frame::Frame;
pub use source::{BlinkSource, FrameSource, SourceError};
