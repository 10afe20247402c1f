//! Board-agnostic core logic for the heartbeat supervisor
//!
//! This crate contains everything that decides *when* the monitored device
//! is reset, independent of the chip it runs on:
//!
//! - Delay configuration table and strap decoding
//! - Timeout engines (wide counter, cascaded counters, millisecond clock)
//! - Heartbeat edge detection
//! - Supervisor state machine driving the reset and power outputs
//!
//! All of it is plain synchronous code over `&mut self`. The firmware wraps
//! the single [`Supervisor`] in a critical-section mutex and calls into it
//! from the tick and heartbeat tasks.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod edge;
pub mod state;
pub mod supervisor;
pub mod timing;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ConfigError, DelayConfig, StrapSelector};
pub use edge::EdgeDetector;
pub use state::{Event, Phase};
pub use supervisor::{HeartbeatOutcome, Supervisor, SupervisorError, SupervisorState, TickOutcome};
pub use timing::{CascadedCounter, MillisClock, TimeoutEngine, WideCounter};
