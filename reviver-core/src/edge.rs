//! Heartbeat edge detection
//!
//! Works from level samples, whatever produced them: a per-tick poll of the
//! input, or the level read back after an edge interrupt. Tracking the
//! previous level means a line that stays high is reported once, not on
//! every sample.

/// Rising-edge detector over level samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeDetector {
    last_level: bool,
}

impl EdgeDetector {
    /// Create a detector that has last seen `initial_level`
    pub const fn new(initial_level: bool) -> Self {
        Self {
            last_level: initial_level,
        }
    }

    /// Feed one sample; returns true on a low-to-high transition
    pub fn sample(&mut self, level: bool) -> bool {
        let rising = level && !self.last_level;
        self.last_level = level;
        rising
    }

    /// Last sampled level
    pub const fn level(&self) -> bool {
        self.last_level
    }
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_rising_edge_once() {
        let mut detector = EdgeDetector::new(false);
        assert!(detector.sample(true));
        assert!(!detector.sample(true));
        assert!(!detector.sample(true));
        assert!(detector.level());
    }

    #[test]
    fn test_ignores_falling_edge() {
        let mut detector = EdgeDetector::new(true);
        assert!(!detector.sample(false));
        assert!(!detector.sample(false));
        assert!(detector.sample(true));
    }

    #[test]
    fn test_started_high_needs_low_first() {
        let mut detector = EdgeDetector::new(true);
        assert!(!detector.sample(true));
        assert!(!detector.sample(false));
        assert!(detector.sample(true));
    }

    #[test]
    fn test_square_wave_counts_periods() {
        let mut detector = EdgeDetector::default();
        let edges = [false, true, true, false, true, false, false, true]
            .iter()
            .filter(|level| detector.sample(**level))
            .count();
        assert_eq!(edges, 3);
    }
}
