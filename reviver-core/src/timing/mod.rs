//! Timeout engines
//!
//! Three interchangeable ways of measuring the silence since the last
//! heartbeat. They differ in counter widths and in how time is represented,
//! not in the contract:
//!
//! - [`WideCounter`] - one 32-bit tick count compared against the threshold
//! - [`CascadedCounter`] - byte-wide major count behind a divider, then a
//!   minor count for the remainder
//! - [`MillisClock`] - free-running millisecond clock, compares the time of
//!   the last heartbeat against "now"
//!
//! Every engine fires exactly once per arming and stays quiet until
//! [`TimeoutEngine::rearm`] is called.

pub mod cascaded;
pub mod millis;
pub mod wide;

pub use cascaded::CascadedCounter;
pub use millis::MillisClock;
pub use wide::WideCounter;

use crate::config::DelayConfig;

/// Common interface of the timeout engines
pub trait TimeoutEngine {
    /// Build an armed engine for `config`
    fn from_config(config: &DelayConfig) -> Self
    where
        Self: Sized;

    /// Restart the measurement from zero and clear the fired latch
    fn rearm(&mut self);

    /// Account for one tick
    ///
    /// Returns true on the single tick where the timeout is reached.
    /// Must be O(1).
    fn tick(&mut self) -> bool;

    /// Ticks since the last rearm (saturating)
    fn elapsed_ticks(&self) -> u32;

    /// Whether the engine has fired since the last rearm
    fn has_fired(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrapSelector;

    /// Ticks from rearm until the engine fires
    fn ticks_until_fire<E: TimeoutEngine>(engine: &mut E, limit: u32) -> Option<u32> {
        (1..=limit).find(|_| engine.tick())
    }

    fn realized_ticks<E: TimeoutEngine>(config: &DelayConfig) -> u32 {
        let mut engine = E::from_config(config);
        ticks_until_fire(&mut engine, config.timeout_ticks * 2).unwrap()
    }

    #[test]
    fn test_engines_agree_at_firmware_tick() {
        for sel in StrapSelector::ALL {
            let config = DelayConfig::from_selector(sel);
            let wide = realized_ticks::<WideCounter>(&config);
            let cascaded = realized_ticks::<CascadedCounter>(&config);
            let millis = realized_ticks::<MillisClock>(&config);

            assert_eq!(wide, config.timeout_ticks);
            assert_eq!(cascaded, config.timeout_ticks);
            assert_eq!(millis, config.timeout_ticks);
        }
    }

    #[test]
    fn test_engines_within_one_tick_at_coarse_tick() {
        let tick_us = 2_048u64;
        for sel in StrapSelector::ALL {
            let config = DelayConfig::new(sel, tick_us as u32);
            let nominal = config.timeout_us();

            for realized in [
                realized_ticks::<WideCounter>(&config),
                realized_ticks::<CascadedCounter>(&config),
                realized_ticks::<MillisClock>(&config),
            ] {
                let realized_us = realized as u64 * tick_us;
                assert!(realized_us >= nominal, "selector {} fired early", sel.bits());
                assert!(realized_us < nominal + tick_us, "selector {} fired late", sel.bits());
            }
        }
    }

    #[test]
    fn test_engines_agree_after_rearm_mid_tick() {
        // Rearm at several offsets into the millisecond clock's sub-ms carry
        for warmup in [1u32, 6, 7, 333] {
            for sel in StrapSelector::ALL {
                let config = DelayConfig::new(sel, 2_048);
                let mut wide = WideCounter::from_config(&config);
                let mut millis = MillisClock::from_config(&config);
                for _ in 0..warmup {
                    wide.tick();
                    millis.tick();
                }
                wide.rearm();
                millis.rearm();

                let limit = config.timeout_ticks * 2;
                let wide_at = ticks_until_fire(&mut wide, limit);
                let millis_at = ticks_until_fire(&mut millis, limit);
                assert_eq!(wide_at, Some(config.timeout_ticks));
                assert_eq!(millis_at, wide_at, "selector {} after {} ticks", sel.bits(), warmup);
            }
        }
    }

    fn check_fires_once<E: TimeoutEngine>() {
        let config = DelayConfig::from_selector(StrapSelector::ALL[0]);
        let mut engine = E::from_config(&config);
        let fired = (0..config.timeout_ticks * 4).filter(|_| engine.tick()).count();
        assert_eq!(fired, 1);
        assert!(engine.has_fired());

        engine.rearm();
        assert!(!engine.has_fired());
        assert_eq!(engine.elapsed_ticks(), 0);
        assert_eq!(ticks_until_fire(&mut engine, config.timeout_ticks * 2), Some(config.timeout_ticks));
    }

    #[test]
    fn test_wide_fires_once() {
        check_fires_once::<WideCounter>();
    }

    #[test]
    fn test_cascaded_fires_once() {
        check_fires_once::<CascadedCounter>();
    }

    #[test]
    fn test_millis_fires_once() {
        check_fires_once::<MillisClock>();
    }
}
