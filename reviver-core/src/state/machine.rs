//! Phase definition
//!
//! Line levels per phase (reset is active-low, power is on when high):
//!
//! | Phase        | reset line | power line |
//! |--------------|------------|------------|
//! | `Boot`       | low        | low        |
//! | `Normal`     | high       | high       |
//! | `Failed`     | low        | low        |
//! | `Rebooting`  | low        | high       |
//! | `Recovering` | high       | low        |

use super::events::Event;

/// Supervisor phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Outputs held low until initialisation completes
    Boot,
    /// Device powered, heartbeat being timed
    Normal,
    /// Timeout detected: reset asserted and power cut, pulse running
    Failed,
    /// Heartbeat returned before the reset pulse finished; power is back on
    /// and the pulse runs to completion
    Rebooting,
    /// Pulse finished, reset released, power still cut until a heartbeat
    Recovering,
}

impl Phase {
    /// Whether the monitored device has power
    pub fn powered(&self) -> bool {
        matches!(self, Phase::Normal | Phase::Rebooting)
    }

    /// Whether the reset line is driven low
    pub fn reset_asserted(&self) -> bool {
        matches!(self, Phase::Boot | Phase::Failed | Phase::Rebooting)
    }

    /// Whether a reset pulse is being timed
    ///
    /// `Boot` holds reset low too, but that hold is released by startup,
    /// not by the pulse timer.
    pub fn pulse_running(&self) -> bool {
        matches!(self, Phase::Failed | Phase::Rebooting)
    }

    /// Whether this phase belongs to a failure episode
    pub fn is_failure(&self) -> bool {
        matches!(self, Phase::Failed | Phase::Rebooting | Phase::Recovering)
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Phase::*;

        match (self, event) {
            (Boot, Started) => Normal,

            (Normal, Timeout) => Failed,

            (Failed, ResetPulseComplete) => Recovering,
            (Failed, Heartbeat) => Rebooting,

            (Rebooting, ResetPulseComplete) => Normal,
            // A new episode while the previous pulse is still running
            (Rebooting, Timeout) => Failed,

            (Recovering, Heartbeat) => Normal,

            // Default: stay in current phase
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_to_normal() {
        assert_eq!(Phase::Boot.transition(Event::Started), Phase::Normal);
    }

    #[test]
    fn test_boot_ignores_runtime_events() {
        for event in [Event::Timeout, Event::ResetPulseComplete, Event::Heartbeat] {
            assert_eq!(Phase::Boot.transition(event), Phase::Boot);
        }
    }

    #[test]
    fn test_failure_cycle() {
        let failed = Phase::Normal.transition(Event::Timeout);
        assert_eq!(failed, Phase::Failed);
        assert!(!failed.powered());
        assert!(failed.reset_asserted());

        let recovering = failed.transition(Event::ResetPulseComplete);
        assert_eq!(recovering, Phase::Recovering);
        assert!(!recovering.powered());
        assert!(!recovering.reset_asserted());

        let normal = recovering.transition(Event::Heartbeat);
        assert_eq!(normal, Phase::Normal);
        assert!(normal.powered());
        assert!(!normal.reset_asserted());
    }

    #[test]
    fn test_early_heartbeat_keeps_pulse() {
        let rebooting = Phase::Failed.transition(Event::Heartbeat);
        assert_eq!(rebooting, Phase::Rebooting);
        assert!(rebooting.powered());
        assert!(rebooting.pulse_running());
        assert_eq!(rebooting.transition(Event::ResetPulseComplete), Phase::Normal);
    }

    #[test]
    fn test_timeout_does_not_refire_while_failed() {
        for phase in [Phase::Failed, Phase::Recovering] {
            assert_eq!(phase.transition(Event::Timeout), phase);
        }
    }

    #[test]
    fn test_heartbeat_in_normal_is_noop() {
        assert_eq!(Phase::Normal.transition(Event::Heartbeat), Phase::Normal);
    }

    #[test]
    fn test_boot_lines_low() {
        assert!(!Phase::Boot.powered());
        assert!(Phase::Boot.reset_asserted());
        assert!(!Phase::Boot.pulse_running());
        assert!(!Phase::Boot.is_failure());
    }

    #[test]
    fn test_failure_episode_phases() {
        assert!(!Phase::Normal.is_failure());
        assert!(Phase::Failed.is_failure());
        assert!(Phase::Rebooting.is_failure());
        assert!(Phase::Recovering.is_failure());
    }
}
