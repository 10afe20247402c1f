//! Shared supervisor and inter-task signals
//!
//! The supervisor is the only mutable state in the firmware. Every task
//! reaches it through a critical-section mutex, which masks interrupts for
//! the duration of the closure and restores the previous state afterwards.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;

use reviver_core::Supervisor;
use reviver_hal_rp2040::RpOutput;

#[cfg(all(feature = "engine-cascaded", feature = "engine-millis"))]
compile_error!("enable at most one of the `engine-cascaded` and `engine-millis` features");

/// Timeout engine selected at build time
#[cfg(feature = "engine-cascaded")]
pub type Engine = reviver_core::CascadedCounter;

/// Timeout engine selected at build time
#[cfg(all(feature = "engine-millis", not(feature = "engine-cascaded")))]
pub type Engine = reviver_core::MillisClock;

/// Timeout engine selected at build time
#[cfg(not(any(feature = "engine-cascaded", feature = "engine-millis")))]
pub type Engine = reviver_core::WideCounter;

pub type BoardSupervisor = Supervisor<Engine, RpOutput<'static>, RpOutput<'static>>;

pub type SharedSupervisor = Mutex<CriticalSectionRawMutex, RefCell<BoardSupervisor>>;

/// Signal that a heartbeat restored power and the tick timer must resume
pub static TICK_WAKE: Signal<CriticalSectionRawMutex, ()> = Signal::new();
