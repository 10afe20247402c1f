//! Cascaded major/minor counter engine
//!
//! Keeps the major count in a byte by counting it behind a divider. Once
//! the major count is complete, a second counter covers the remainder
//! tick by tick. The effective threshold is
//! `major_max * major_span + minor_max`.

use super::TimeoutEngine;
use crate::config::{CascadeParams, DelayConfig};

#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CascadedCounter {
    params: CascadeParams,
    /// Ticks towards the next major count
    divider: u32,
    major: u8,
    minor: u32,
    fired: bool,
}

impl CascadedCounter {
    pub fn new(params: CascadeParams) -> Self {
        Self {
            params,
            divider: 0,
            major: 0,
            minor: 0,
            fired: false,
        }
    }

    /// Major counts completed since the last rearm
    pub fn major(&self) -> u8 {
        self.major
    }

    /// Minor ticks counted since the major count completed
    pub fn minor(&self) -> u32 {
        self.minor
    }
}

impl TimeoutEngine for CascadedCounter {
    fn from_config(config: &DelayConfig) -> Self {
        Self::new(config.cascade)
    }

    fn rearm(&mut self) {
        self.divider = 0;
        self.major = 0;
        self.minor = 0;
        self.fired = false;
    }

    fn tick(&mut self) -> bool {
        if self.fired {
            return false;
        }

        if self.major < self.params.major_max {
            self.divider += 1;
            if self.divider >= self.params.major_span {
                self.divider = 0;
                self.major += 1;
            }
            if self.major < self.params.major_max || self.params.minor_max > 0 {
                return false;
            }
        } else {
            self.minor += 1;
            if self.minor < self.params.minor_max {
                return false;
            }
        }

        self.fired = true;
        true
    }

    fn elapsed_ticks(&self) -> u32 {
        self.major as u32 * self.params.major_span + self.divider + self.minor
    }

    fn has_fired(&self) -> bool {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(major_span: u32, major_max: u8, minor_max: u32) -> CascadeParams {
        CascadeParams {
            major_span,
            major_max,
            minor_max,
        }
    }

    #[test]
    fn test_major_then_minor() {
        let mut engine = CascadedCounter::new(params(4, 2, 3));
        for _ in 0..8 {
            assert!(!engine.tick());
        }
        assert_eq!(engine.major(), 2);
        assert_eq!(engine.minor(), 0);

        assert!(!engine.tick());
        assert!(!engine.tick());
        assert_eq!(engine.elapsed_ticks(), 10);
        assert!(engine.tick());
        assert_eq!(engine.minor(), 3);
    }

    #[test]
    fn test_exact_major_multiple() {
        let mut engine = CascadedCounter::new(params(4, 2, 0));
        let fired_at = (1..=20).find(|_| engine.tick());
        assert_eq!(fired_at, Some(8));
    }

    #[test]
    fn test_minor_only() {
        let mut engine = CascadedCounter::new(params(256, 0, 5));
        let fired_at = (1..=20).find(|_| engine.tick());
        assert_eq!(fired_at, Some(5));
    }

    #[test]
    fn test_rearm_clears_all_stages() {
        let mut engine = CascadedCounter::new(params(4, 1, 2));
        for _ in 0..5 {
            engine.tick();
        }
        engine.rearm();
        assert_eq!(engine.elapsed_ticks(), 0);
        assert_eq!(engine.major(), 0);
        let fired_at = (1..=20).find(|_| engine.tick());
        assert_eq!(fired_at, Some(6));
    }
}
