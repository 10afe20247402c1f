//! Millisecond clock engine
//!
//! Maintains a free-running millisecond clock from ticks whose period need
//! not be a whole number of milliseconds. The sub-millisecond part of each
//! tick is carried in `fraction_us` rather than truncated, so the clock never
//! drifts against the tick base. The timeout is measured as the wrapping
//! difference between "now" and the time of the last heartbeat, including
//! the sub-millisecond part of both.

use super::TimeoutEngine;
use crate::config::DelayConfig;

#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MillisClock {
    tick_period_us: u32,
    timeout_ms: u32,
    now_ms: u32,
    /// Microseconds accumulated towards the next whole millisecond
    fraction_us: u32,
    last_heartbeat_ms: u32,
    /// `fraction_us` at the last rearm
    last_heartbeat_fraction_us: u32,
    ticks_since_rearm: u32,
    fired: bool,
}

impl MillisClock {
    pub fn new(tick_period_us: u32, timeout_ms: u32) -> Self {
        Self {
            tick_period_us,
            timeout_ms,
            now_ms: 0,
            fraction_us: 0,
            last_heartbeat_ms: 0,
            last_heartbeat_fraction_us: 0,
            ticks_since_rearm: 0,
            fired: false,
        }
    }

    /// Current clock reading in milliseconds
    pub fn now_ms(&self) -> u32 {
        self.now_ms
    }

    /// Milliseconds since the last rearm
    pub fn elapsed_ms(&self) -> u32 {
        self.now_ms.wrapping_sub(self.last_heartbeat_ms)
    }

    /// Microseconds since the last rearm
    pub fn elapsed_us(&self) -> u64 {
        // Never negative: a whole elapsed millisecond outweighs any fraction
        self.elapsed_ms() as u64 * 1_000 + self.fraction_us as u64
            - self.last_heartbeat_fraction_us as u64
    }

    fn advance(&mut self) {
        self.fraction_us += self.tick_period_us;
        self.now_ms = self.now_ms.wrapping_add(self.fraction_us / 1_000);
        self.fraction_us %= 1_000;
    }
}

impl TimeoutEngine for MillisClock {
    fn from_config(config: &DelayConfig) -> Self {
        Self::new(config.tick_period_us, config.timeout_ms)
    }

    fn rearm(&mut self) {
        self.last_heartbeat_ms = self.now_ms;
        self.last_heartbeat_fraction_us = self.fraction_us;
        self.ticks_since_rearm = 0;
        self.fired = false;
    }

    fn tick(&mut self) -> bool {
        // The clock keeps running after a timeout; only the comparison stops
        self.advance();
        if self.fired {
            return false;
        }

        self.ticks_since_rearm = self.ticks_since_rearm.saturating_add(1);
        if self.elapsed_us() >= self.timeout_ms as u64 * 1_000 {
            self.fired = true;
        }
        self.fired
    }

    fn elapsed_ticks(&self) -> u32 {
        self.ticks_since_rearm
    }

    fn has_fired(&self) -> bool {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_carry_has_no_drift() {
        let mut clock = MillisClock::new(2_048, u32::MAX);
        // 1000 ticks of 2.048 ms is exactly 2048 ms
        for _ in 0..1_000 {
            clock.tick();
        }
        assert_eq!(clock.now_ms(), 2_048);

        // 125 ticks of 2.048 ms is exactly 256 ms
        for _ in 0..125 {
            clock.tick();
        }
        assert_eq!(clock.now_ms(), 2_304);
    }

    #[test]
    fn test_sub_millisecond_tick() {
        let mut clock = MillisClock::new(250, 1);
        assert!(!clock.tick());
        assert!(!clock.tick());
        assert!(!clock.tick());
        assert!(clock.tick());
        assert_eq!(clock.elapsed_ticks(), 4);
    }

    #[test]
    fn test_clock_runs_after_fire() {
        let mut clock = MillisClock::new(1_000, 5);
        for _ in 0..5 {
            clock.tick();
        }
        assert!(clock.has_fired());
        for _ in 0..10 {
            assert!(!clock.tick());
        }
        assert_eq!(clock.now_ms(), 15);
        assert_eq!(clock.elapsed_ticks(), 5);
    }

    #[test]
    fn test_rearm_measures_from_now() {
        let mut clock = MillisClock::new(1_000, 10);
        for _ in 0..7 {
            clock.tick();
        }
        clock.rearm();
        assert_eq!(clock.elapsed_ms(), 0);
        let fired_at = (1..=20).find(|_| clock.tick());
        assert_eq!(fired_at, Some(10));
    }

    #[test]
    fn test_rearm_keeps_pending_fraction() {
        let mut clock = MillisClock::new(2_048, 500);
        for _ in 0..6 {
            clock.tick();
        }
        // 6 * 2048 us leaves 288 us towards the next millisecond
        assert_eq!(clock.now_ms(), 12);
        clock.rearm();
        assert_eq!(clock.elapsed_us(), 0);

        // 244 ticks is 499.712 ms, 245 ticks is 501.760 ms
        let fired_at = (1..=300).find(|_| clock.tick());
        assert_eq!(fired_at, Some(245));
        assert_eq!(clock.elapsed_us(), 245 * 2_048);
    }

    #[test]
    fn test_wraparound() {
        let mut clock = MillisClock::new(1_000, 10);
        clock.now_ms = u32::MAX - 3;
        clock.rearm();
        let fired_at = (1..=20).find(|_| clock.tick());
        assert_eq!(fired_at, Some(10));
        assert_eq!(clock.now_ms(), 6);
    }
}
