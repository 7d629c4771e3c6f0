//! Short moving-average smoothing.
//!
//! Attenuates single-frame sensor and compression noise without
//! materially delaying response to genuine state changes. The window
//! must stay small relative to the minimum pulse width in frames or
//! pulse edges smear and short/long classification degrades.

use std::collections::VecDeque;

/// Fixed-window moving average over the most recent raw values.
#[derive(Debug, Clone)]
pub struct Smoother {
    window: VecDeque<f64>,
    capacity: usize,
}

impl Smoother {
    /// Creates a smoother with the given window length.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes a raw value and returns the mean of the current window.
    ///
    /// During warm-up the mean covers however many values have arrived.
    pub fn push(&mut self, value: f64) -> f64 {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(value);

        let sum: f64 = self.window.iter().sum();
        sum / self.window.len() as f64
    }

    /// Clears the window.
    pub fn reset(&mut self) {
        self.window.clear();
    }

    /// Returns the configured window length.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
