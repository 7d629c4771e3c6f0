//! Per-frame pipeline orchestration.
//!
//! Drives one tick per delivered frame: extract, smooth, baseline,
//! digitize, classify, decode, then append to the diagnostic trace.
//! The pipeline owns all decoder state exclusively and mutates it only
//! during its own tick; it never blocks mid-tick. A stalled source
//! simply stalls ticks.

use std::collections::VecDeque;

use crate::capture::{ConfigError, DecoderConfig, Frame};
use crate::decode::{DecodedEvent, ManchesterDecoder, PulseClassifier};
use crate::signal::{BaselineTracker, Digitizer, RoiSampler, Smoother};

/// Fixed-capacity FIFO of (amplified signal, digital state) pairs.
///
/// Purely diagnostic; not load-bearing for decode correctness and safe
/// to ignore in a headless deployment.
#[derive(Debug, Clone)]
pub struct TraceBuffer {
    buffer: VecDeque<(f64, bool)>,
    capacity: usize,
}

impl TraceBuffer {
    fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, amplified: f64, state: bool) {
        if self.buffer.len() == self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back((amplified, state));
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Iterates over the retained pairs, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &(f64, bool)> {
        self.buffer.iter()
    }

    /// Number of retained pairs.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Maximum number of retained pairs.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// The per-frame decode pipeline.
///
/// Single-threaded and frame-driven: call [`process`](Self::process)
/// exactly once per delivered frame, on whatever thread drives the
/// capture cycle. Decoded events come back in strict tick order, one
/// at a time.
pub struct SignalPipeline {
    sampler: RoiSampler,
    smoother: Smoother,
    baseline: BaselineTracker,
    digitizer: Digitizer,
    classifier: PulseClassifier,
    decoder: ManchesterDecoder,
    gain: f64,
    threshold: f64,
    trace: TraceBuffer,
    ticks: u64,
}

impl SignalPipeline {
    /// Builds a pipeline from a validated configuration.
    pub fn new(config: &DecoderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            sampler: RoiSampler::new(config.roi_size, config.channel_metric),
            smoother: Smoother::new(config.smoothing_window),
            baseline: BaselineTracker::new(config.baseline_alpha),
            digitizer: Digitizer::new(),
            classifier: PulseClassifier::new(config.long_cutoff),
            decoder: ManchesterDecoder::new(),
            gain: config.gain,
            threshold: config.threshold,
            trace: TraceBuffer::new(config.trace_capacity),
            ticks: 0,
        })
    }

    /// Processes one delivered frame; returns a decoded event, if any.
    ///
    /// Malformed frames are skipped without mutating decoder state.
    pub fn process(&mut self, frame: &Frame) -> Option<DecodedEvent> {
        let sample = self.sampler.sample(frame)?;

        let smoothed = self.smoother.push(sample.value);
        let ac = self.baseline.update(smoothed);
        let amplified = ac * self.gain;
        let state = self.digitizer.update(amplified, self.threshold);

        self.ticks += 1;
        self.trace.push(amplified, state);

        let event = self
            .classifier
            .push(state)
            .and_then(|pulse| self.decoder.push(pulse));

        if let Some(ref event) = event {
            tracing::debug!(tick = self.ticks, %event, "decoded event");
        }
        event
    }

    /// Sets the amplification applied before digitization.
    ///
    /// Takes effect on the next tick; no restart required.
    pub fn set_gain(&mut self, gain: f64) -> Result<(), ConfigError> {
        if !(gain > 0.0 && gain.is_finite()) {
            return Err(ConfigError::InvalidGain(gain));
        }
        self.gain = gain;
        Ok(())
    }

    /// Sets the hysteresis half-width. Takes effect on the next tick.
    pub fn set_threshold(&mut self, threshold: f64) -> Result<(), ConfigError> {
        if !(threshold > 0.0 && threshold.is_finite()) {
            return Err(ConfigError::InvalidThreshold(threshold));
        }
        self.threshold = threshold;
        Ok(())
    }

    /// Current gain.
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Current hysteresis half-width.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Read-only view of the diagnostic trace.
    pub fn trace(&self) -> &TraceBuffer {
        &self.trace
    }

    /// Ticks processed since construction or the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Resets all decoder state.
    ///
    /// Mandatory whenever the upstream source is replaced: baseline,
    /// pending pulse, accumulator and run counters all assume ROI and
    /// lighting continuity that does not hold across sources.
    pub fn reset(&mut self) {
        self.smoother.reset();
        self.baseline.reset();
        self.digitizer.reset();
        self.classifier.reset();
        self.decoder.reset();
        self.trace.clear();
        self.ticks = 0;
        tracing::info!("pipeline state reset");
    }
}
