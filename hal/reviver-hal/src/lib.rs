//! Reviver Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the supervisor core
//! needs. Chip-specific HALs implement them so the timing engine can be
//! tested on the host and run unchanged on the target.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  reviver-firmware (tasks, board map)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  reviver-core (supervisor, engines)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  reviver-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ reviver-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`timer::TickTimer`] - Gated periodic tick source

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod gpio;
pub mod timer;

pub use gpio::{InputPin, OutputPin};
pub use timer::{TickTimer, TimerStatus};
