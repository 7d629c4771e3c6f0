//! Adaptive baseline removal (AC coupling).
//!
//! A first-order IIR low-pass tracks the slow "DC" component of the
//! sampled metric (ambient lighting, auto white balance) so that drift
//! does not masquerade as signal. The AC component handed downstream
//! is the smoothed sample minus this baseline.

/// Exponential moving average of the sampled metric.
///
/// `baseline <- baseline * alpha + sample * (1 - alpha)` with alpha
/// close to 1, so only slow drift is tracked, never the modulation
/// itself. The first sample initializes the baseline directly to avoid
/// a startup transient.
#[derive(Debug, Clone)]
pub struct BaselineTracker {
    alpha: f64,
    baseline: Option<f64>,
}

impl BaselineTracker {
    /// Creates a tracker with the given IIR coefficient in (0, 1).
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            baseline: None,
        }
    }

    /// Updates the baseline with one sample and returns the AC component.
    pub fn update(&mut self, sample: f64) -> f64 {
        let baseline = match self.baseline {
            None => sample,
            Some(b) => b * self.alpha + sample * (1.0 - self.alpha),
        };
        self.baseline = Some(baseline);
        sample - baseline
    }

    /// Returns the current baseline, if initialized.
    pub fn baseline(&self) -> Option<f64> {
        self.baseline
    }

    /// Resets to uninitialized.
    ///
    /// Required whenever the upstream source changes: a baseline carried
    /// over from a different physical scene is meaningless.
    pub fn reset(&mut self) {
        self.baseline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_sample_initializes() {
        let mut tracker = BaselineTracker::new(0.97);
        let ac = tracker.update(42.0);

        // No startup transient: baseline equals the first sample.
        assert_eq!(tracker.baseline(), Some(42.0));
        assert_eq!(ac, 0.0);
    }

    #[test]
    fn test_alternating_input_centers_near_zero() {
        let mut tracker = BaselineTracker::new(0.97);
        for i in 0..2000 {
            let v = if i % 2 == 0 { 10.0 } else { -10.0 };
            tracker.update(v);
        }

        // AC/DC separation: the baseline settles near the mean, not
        // at either extreme of the modulation.
        assert!(tracker.baseline().unwrap().abs() < 0.5);
    }

    #[test]
    fn test_reset_forgets_scene() {
        let mut tracker = BaselineTracker::new(0.97);
        tracker.update(100.0);
        tracker.reset();

        assert_eq!(tracker.baseline(), None);
        tracker.update(-5.0);
        assert_eq!(tracker.baseline(), Some(-5.0));
    }

    proptest! {
        /// Constant input converges the baseline to that value for any
        /// alpha in (0, 1), regardless of where the baseline started.
        #[test]
        fn prop_converges_to_constant(
            alpha in 0.01f64..0.99,
            start in -1000.0f64..1000.0,
            target in -1000.0f64..1000.0,
        ) {
            let mut tracker = BaselineTracker::new(alpha);
            tracker.update(start);
            let mut ac = 0.0;
            for _ in 0..20_000 {
                ac = tracker.update(target);
            }
            prop_assert!((tracker.baseline().unwrap() - target).abs() < 1e-6);
            prop_assert!(ac.abs() < 1e-6);
        }
    }
}
