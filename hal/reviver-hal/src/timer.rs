//! Periodic tick source
//!
//! The tick is the only time base the supervisor has. Implementations
//! deliver ticks at a constant period and can be gated off entirely while
//! nothing needs counting.

/// Snapshot of a tick source for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerStatus {
    /// Tick period in microseconds
    pub period_us: u32,
    /// Whether ticks are being delivered
    pub running: bool,
}

/// A gated periodic tick source
pub trait TickTimer {
    /// Tick period in microseconds
    fn period_us(&self) -> u32;

    /// Resume tick delivery
    ///
    /// The first tick after a restart arrives one full period later.
    /// Calling this on a running timer has no effect.
    fn start(&mut self);

    /// Stop tick delivery
    fn stop(&mut self);

    /// Whether ticks are currently being delivered
    fn is_running(&self) -> bool;

    fn status(&self) -> TimerStatus {
        TimerStatus {
            period_us: self.period_us(),
            running: self.is_running(),
        }
    }
}
