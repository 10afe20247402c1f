//! Strap pin reader
//!
//! The strap lines are only read once, at boot, after the pulls have had
//! time to settle.

use embassy_rp::gpio::{AnyPin, Pull};
use embassy_rp::Peri;
use embassy_time::Timer;

use reviver_core::config::{read_selector, ConfigError, StrapSelector, STRAP_LINES};

use crate::gpio::RpInput;

/// Settling time between enabling the pulls and sampling
pub const STRAP_SETTLE_US: u64 = 50;

/// The three timeout-select strap inputs
pub struct StrapPins<'d> {
    lines: [RpInput<'d>; STRAP_LINES],
}

impl<'d> StrapPins<'d> {
    /// Configure the strap inputs, LSB first
    pub fn new(
        lsb: Peri<'d, AnyPin>,
        mid: Peri<'d, AnyPin>,
        msb: Peri<'d, AnyPin>,
        pull: Pull,
    ) -> Self {
        Self {
            lines: [
                RpInput::new(lsb, pull),
                RpInput::new(mid, pull),
                RpInput::new(msb, pull),
            ],
        }
    }

    /// Wait for the pulls to settle and decode the selector
    ///
    /// Consumes the pins: they are released back to their reset state
    /// once sampled.
    pub async fn read(self) -> Result<StrapSelector, ConfigError> {
        Timer::after_micros(STRAP_SETTLE_US).await;
        read_selector(&self.lines)
    }
}
