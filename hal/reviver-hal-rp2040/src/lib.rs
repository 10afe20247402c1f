//! RP2040-specific HAL for the heartbeat supervisor
//!
//! This crate provides RP2040 implementations of the `reviver-hal` traits:
//!
//! - GPIO adapters over `embassy-rp` pins
//! - Strap pin reader
//! - Gated periodic tick timer over `embassy-time`

#![no_std]

pub mod gpio;
pub mod strap;
pub mod timer;

pub use gpio::{RpInput, RpOutput};
pub use strap::StrapPins;
pub use timer::PeriodicTick;
