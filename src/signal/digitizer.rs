//! Hysteresis digitization (Schmitt trigger).
//!
//! Converts the amplified AC component into a binary state per frame.
//! The dead zone between the two thresholds is essential: without it,
//! noise near zero would cause chatter that destroys pulse-width
//! classification downstream.

/// Schmitt-trigger comparator with symmetric thresholds.
///
/// State goes high when the amplified signal exceeds `+threshold`, low
/// when it drops below `-threshold`, and holds otherwise. Initial state
/// is low until the first positive crossing.
#[derive(Debug, Clone, Default)]
pub struct Digitizer {
    state: bool,
}

impl Digitizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates one amplified sample against the hysteresis band.
    ///
    /// `threshold` is the half-width of the dead zone and must be
    /// positive; it may change between ticks.
    pub fn update(&mut self, amplified: f64, threshold: f64) -> bool {
        if amplified > threshold {
            self.state = true;
        } else if amplified < -threshold {
            self.state = false;
        }
        self.state
    }

    /// Returns the current state without evaluating a sample.
    pub fn state(&self) -> bool {
        self.state
    }

    /// Resets to the initial low state.
    pub fn reset(&mut self) {
        self.state = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_crossings_flip_state() {
        let mut digitizer = Digitizer::new();
        assert!(!digitizer.update(0.5, 1.0));
        assert!(digitizer.update(1.5, 1.0));
        assert!(digitizer.update(0.0, 1.0)); // dead zone holds high
        assert!(!digitizer.update(-1.5, 1.0));
    }

    #[test]
    fn test_dead_zone_holds_state() {
        let mut digitizer = Digitizer::new();
        digitizer.update(2.0, 1.0);

        // Values inside (-T, T) never change the state.
        for v in [0.9, -0.9, 0.0, 0.5, -0.99] {
            assert!(digitizer.update(v, 1.0));
        }
    }

    #[test]
    fn test_threshold_change_applies_immediately() {
        let mut digitizer = Digitizer::new();
        assert!(!digitizer.update(1.5, 2.0));
        assert!(digitizer.update(1.5, 1.0));
    }

    proptest! {
        /// For any sequence oscillating strictly inside the hysteresis
        /// band, the state after initialization never changes.
        #[test]
        fn prop_no_chatter_inside_band(
            threshold in 0.1f64..100.0,
            samples in proptest::collection::vec(-0.999f64..0.999, 1..200),
        ) {
            let mut digitizer = Digitizer::new();
            let initial = digitizer.state();
            for s in samples {
                let state = digitizer.update(s * threshold, threshold);
                prop_assert_eq!(state, initial);
            }
        }
    }
}
