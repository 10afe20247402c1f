//! Events that trigger phase transitions

/// Events that can trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Startup finished, outputs may be energised
    Started,
    /// No heartbeat within the configured timeout
    Timeout,
    /// Reset line has been held for the full pulse width
    ResetPulseComplete,
    /// Rising edge on the heartbeat input
    Heartbeat,
}
