//! Run-length pulse classification.
//!
//! Measures runs of consecutive identical digital states and, at each
//! transition, classifies the just-completed run as a short (half-bit)
//! or long (full-bit) pulse against a fixed tick cutoff. The cutoff is
//! configuration derived from the expected modulation rate and capture
//! frame rate; no adaptive clock recovery is performed.

/// Logical level of a completed pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseLevel {
    /// Digital state 0.
    Low,
    /// Digital state 1.
    High,
}

impl PulseLevel {
    /// Maps a digital state to its pulse level.
    pub fn from_state(state: bool) -> Self {
        if state {
            PulseLevel::High
        } else {
            PulseLevel::Low
        }
    }

}

/// Width class of a completed pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseWidth {
    /// Roughly one half-bit.
    Short,
    /// Roughly one full bit (two merged half-bits).
    Long,
}

/// A completed run of identical digital states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    /// Level held for the duration of the run.
    pub level: PulseLevel,
    /// Run length in ticks.
    pub ticks: u32,
    /// Short/long classification against the cutoff.
    pub width: PulseWidth,
}

/// Classifies completed runs at each state transition.
///
/// At most one pulse is produced per tick, at the instant the state
/// flips; the run-length counter then restarts at 1 for the new state.
#[derive(Debug, Clone)]
pub struct PulseClassifier {
    last_state: Option<bool>,
    run_ticks: u32,
    long_cutoff: u32,
}

impl PulseClassifier {
    /// Creates a classifier with the given long-pulse cutoff in ticks.
    pub fn new(long_cutoff: u32) -> Self {
        Self {
            last_state: None,
            run_ticks: 0,
            long_cutoff: long_cutoff.max(2),
        }
    }

    /// Feeds one digital state; returns the completed pulse on a flip.
    pub fn push(&mut self, state: bool) -> Option<Pulse> {
        match self.last_state {
            None => {
                self.last_state = Some(state);
                self.run_ticks = 1;
                None
            }
            Some(last) if last == state => {
                self.run_ticks = self.run_ticks.saturating_add(1);
                None
            }
            Some(last) => {
                let pulse = Pulse {
                    level: PulseLevel::from_state(last),
                    ticks: self.run_ticks,
                    width: if self.run_ticks >= self.long_cutoff {
                        PulseWidth::Long
                    } else {
                        PulseWidth::Short
                    },
                };
                self.last_state = Some(state);
                self.run_ticks = 1;
                Some(pulse)
            }
        }
    }

    /// Length of the run currently in progress.
    pub fn current_run(&self) -> u32 {
        self.run_ticks
    }

    /// Clears run state, as on a source change.
    pub fn reset(&mut self) {
        self.last_state = None;
        self.run_ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(classifier: &mut PulseClassifier, states: &[bool]) -> Vec<Pulse> {
        states.iter().filter_map(|&s| classifier.push(s)).collect()
    }

    #[test]
    fn test_no_pulse_without_transition() {
        let mut classifier = PulseClassifier::new(4);
        assert!(feed(&mut classifier, &[true; 10]).is_empty());
        assert_eq!(classifier.current_run(), 10);
    }

    #[test]
    fn test_short_and_long_classification() {
        let mut classifier = PulseClassifier::new(4);
        // 2 highs, 4 lows, then a high to terminate the low run.
        let pulses = feed(
            &mut classifier,
            &[true, true, false, false, false, false, true],
        );

        assert_eq!(pulses.len(), 2);
        assert_eq!(pulses[0].level, PulseLevel::High);
        assert_eq!(pulses[0].ticks, 2);
        assert_eq!(pulses[0].width, PulseWidth::Short);
        assert_eq!(pulses[1].level, PulseLevel::Low);
        assert_eq!(pulses[1].ticks, 4);
        assert_eq!(pulses[1].width, PulseWidth::Long);
    }

    #[test]
    fn test_cutoff_boundary() {
        let mut classifier = PulseClassifier::new(4);
        let pulses = feed(&mut classifier, &[true, true, true, false]);

        // Exactly cutoff - 1 ticks stays short.
        assert_eq!(pulses[0].width, PulseWidth::Short);

        let mut classifier = PulseClassifier::new(4);
        let pulses = feed(&mut classifier, &[true, true, true, true, false]);
        assert_eq!(pulses[0].width, PulseWidth::Long);
    }

    #[test]
    fn test_run_restarts_after_flip() {
        let mut classifier = PulseClassifier::new(4);
        classifier.push(true);
        classifier.push(true);
        classifier.push(false);
        assert_eq!(classifier.current_run(), 1);
    }

    #[test]
    fn test_reset_forgets_run() {
        let mut classifier = PulseClassifier::new(4);
        classifier.push(true);
        classifier.reset();

        // First state after reset starts a fresh run, no pulse emitted.
        assert!(classifier.push(false).is_none());
        assert_eq!(classifier.current_run(), 1);
    }
}
