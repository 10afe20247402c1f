//! Board pin map
//!
//! Pin numbers come from `board.toml`, validated and rendered by `build.rs`.
//! The generated `take_board_pins!` macro moves exactly those pins out of
//! the peripherals.

use embassy_rp::gpio::AnyPin;
use embassy_rp::Peri;

use reviver_core::config::STRAP_LINES;

include!(concat!(env!("OUT_DIR"), "/board_pins.rs"));

/// Pins owned by the supervisor
pub struct BoardPins {
    pub heartbeat: Peri<'static, AnyPin>,
    pub reset: Peri<'static, AnyPin>,
    pub power: Peri<'static, AnyPin>,
    /// Timeout select straps, LSB first
    pub strap: [Peri<'static, AnyPin>; STRAP_LINES],
}
