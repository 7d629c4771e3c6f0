//! Per-frame signal conditioning.
//!
//! Turns each captured frame into a binary state: ROI sampling to a
//! scalar, short moving-average smoothing, adaptive baseline removal,
//! then hysteresis digitization. Everything downstream of this module
//! works in binary states and tick counts.

mod baseline;
mod digitizer;
mod sampler;
mod smoother;

pub use baseline::BaselineTracker;
pub use digitizer::Digitizer;
pub use sampler::{FrameSample, RoiSampler};
pub use smoother::Smoother;
