//! Delay configuration table
//!
//! Maps a strap selector to the timing parameters every timeout engine
//! needs. All values are expressed in whole ticks so that counting is exact:
//! the only deviation from the nominal timeout is rounding the nominal
//! duration up to the next tick boundary.

use super::strap::{StrapSelector, SELECTOR_COUNT};

/// Tick period of the firmware time base (1 ms)
pub const TICK_PERIOD_US: u32 = 1_000;

/// Reset pulse width, identical for every selector
pub const RESET_PULSE_MS: u32 = 100;

/// Nominal timeout per selector; selector 0 is the shortest
pub const TIMEOUT_TABLE_MS: [u32; SELECTOR_COUNT as usize] =
    [500, 1_000, 3_000, 5_000, 10_000, 15_000, 30_000, 60_000];

/// Smallest divider span for the cascaded engine
pub const CASCADE_BASE_SPAN: u32 = 256;

/// Maximum tolerated deviation of a realized timeout (2%)
pub const MAX_TIMEOUT_ERROR_PPM: u32 = 20_000;

/// Number of whole ticks covering `duration_us`, rounded up
const fn ticks_for(duration_us: u64, tick_period_us: u32) -> u32 {
    let tick = tick_period_us as u64;
    ((duration_us + tick - 1) / tick) as u32
}

/// Counter parameters for the cascaded (major/minor) engine
///
/// A divider counts ticks up to `major_span`, each wrap advances the major
/// count, and once the major count reaches `major_max` the minor count
/// covers the remaining `minor_max` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CascadeParams {
    /// Ticks per major count (a power of two, at least 256)
    pub major_span: u32,
    /// Major counts before switching to the minor count
    pub major_max: u8,
    /// Ticks counted after the last major count
    pub minor_max: u32,
}

impl CascadeParams {
    /// Split a tick threshold so the major count fits in a byte
    pub const fn for_ticks(ticks: u32) -> Self {
        let mut span = CASCADE_BASE_SPAN;
        while ticks / span > u8::MAX as u32 {
            span *= 2;
        }
        Self {
            major_span: span,
            major_max: (ticks / span) as u8,
            minor_max: ticks % span,
        }
    }

    /// Total ticks until the engine fires
    pub const fn threshold_ticks(&self) -> u32 {
        self.major_max as u32 * self.major_span + self.minor_max
    }
}

/// Timing parameters selected at boot
///
/// Exactly one of these exists per boot. It is built before the supervisor
/// starts and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DelayConfig {
    /// Selector this configuration was built from
    pub selector: StrapSelector,
    /// Nominal timeout in milliseconds
    pub timeout_ms: u32,
    /// Tick period in microseconds
    pub tick_period_us: u32,
    /// Ticks without a heartbeat before the device is declared failed
    pub timeout_ticks: u32,
    /// Ticks the reset line stays asserted
    pub reset_pulse_ticks: u32,
    /// Parameters for [`crate::timing::CascadedCounter`]
    pub cascade: CascadeParams,
}

impl DelayConfig {
    /// Build the configuration for `selector` at the given tick period
    ///
    /// # Panics
    /// If `tick_period_us` is zero.
    pub const fn new(selector: StrapSelector, tick_period_us: u32) -> Self {
        assert!(tick_period_us > 0, "tick period must be non-zero");

        let timeout_ms = TIMEOUT_TABLE_MS[selector.index()];
        let timeout_ticks = ticks_for(timeout_ms as u64 * 1_000, tick_period_us);

        Self {
            selector,
            timeout_ms,
            tick_period_us,
            timeout_ticks,
            reset_pulse_ticks: ticks_for(RESET_PULSE_MS as u64 * 1_000, tick_period_us),
            cascade: CascadeParams::for_ticks(timeout_ticks),
        }
    }

    /// Build the configuration for `selector` at the firmware tick period
    pub const fn from_selector(selector: StrapSelector) -> Self {
        Self::new(selector, TICK_PERIOD_US)
    }

    /// Nominal timeout in microseconds
    pub const fn timeout_us(&self) -> u64 {
        self.timeout_ms as u64 * 1_000
    }

    /// Timeout actually realized by counting `timeout_ticks`
    pub const fn realized_timeout_us(&self) -> u64 {
        self.timeout_ticks as u64 * self.tick_period_us as u64
    }

    /// Reset pulse actually realized by counting `reset_pulse_ticks`
    pub const fn realized_reset_pulse_us(&self) -> u64 {
        self.reset_pulse_ticks as u64 * self.tick_period_us as u64
    }

    /// Deviation of the realized timeout from nominal, in parts per million
    pub const fn error_ppm(&self) -> u32 {
        let nominal = self.timeout_us();
        let excess = self.realized_timeout_us() - nominal;
        (excess * 1_000_000 / nominal) as u32
    }

    /// Whether the realized timeout is within [`MAX_TIMEOUT_ERROR_PPM`]
    pub const fn within_tolerance(&self) -> bool {
        self.error_ppm() <= MAX_TIMEOUT_ERROR_PPM
    }
}
