//! Single wide counter engine

use super::TimeoutEngine;
use crate::config::DelayConfig;

/// Counts ticks in one 32-bit register and compares against the threshold
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WideCounter {
    count: u32,
    threshold: u32,
    fired: bool,
}

impl WideCounter {
    pub fn new(threshold_ticks: u32) -> Self {
        Self {
            count: 0,
            threshold: threshold_ticks,
            fired: false,
        }
    }
}

impl TimeoutEngine for WideCounter {
    fn from_config(config: &DelayConfig) -> Self {
        Self::new(config.timeout_ticks)
    }

    fn rearm(&mut self) {
        self.count = 0;
        self.fired = false;
    }

    fn tick(&mut self) -> bool {
        if self.fired {
            return false;
        }

        self.count = self.count.saturating_add(1);
        if self.count >= self.threshold {
            self.fired = true;
        }
        self.fired
    }

    fn elapsed_ticks(&self) -> u32 {
        self.count
    }

    fn has_fired(&self) -> bool {
        self.fired
    }
}
