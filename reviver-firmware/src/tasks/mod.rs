//! Embassy async tasks
//!
//! With edge interrupts (the default) the tick task and the heartbeat task
//! run side by side. With `heartbeat-polling` a single task samples the
//! input on every tick.

#[cfg(not(feature = "heartbeat-polling"))]
pub mod heartbeat;
pub mod tick;

#[cfg(not(feature = "heartbeat-polling"))]
pub use heartbeat::heartbeat_task;
#[cfg(feature = "heartbeat-polling")]
pub use tick::polling_tick_task;
#[cfg(not(feature = "heartbeat-polling"))]
pub use tick::tick_task;
