//! Supervisor: the single owner of the reset and power outputs
//!
//! Combines a [`TimeoutEngine`], an [`EdgeDetector`] and the [`Phase`]
//! machine. The firmware calls [`Supervisor::on_tick`] from the tick task
//! and [`Supervisor::on_input_level`] (or [`Supervisor::on_heartbeat`]) from
//! the heartbeat task, always under the same critical section. Every call
//! is bounded and allocation-free.

use reviver_hal::{OutputPin, TickTimer};

use crate::config::DelayConfig;
use crate::edge::EdgeDetector;
use crate::state::{Event, Phase};
use crate::timing::TimeoutEngine;

/// Errors returned by [`Supervisor::start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SupervisorError {
    /// `start` was called more than once
    AlreadyStarted,
    /// The unpowered device is driving the heartbeat line high
    HeartbeatHigh,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    /// The reset pulse completed and the line was released
    pub reset_released: bool,
    /// The heartbeat timed out; reset asserted and power cut
    pub timed_out: bool,
}

impl TickOutcome {
    /// True if the tick changed no output
    pub fn is_quiet(&self) -> bool {
        !self.reset_released && !self.timed_out
    }
}

/// Result of a reported heartbeat edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeartbeatOutcome {
    /// Timeout measurement restarted
    Rearmed,
    /// Device was unpowered; power is back on and the timeout restarted
    PowerRestored,
    /// Supervisor has not started yet
    Ignored,
}

/// Snapshot of the supervisor for logging and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SupervisorState {
    /// Current phase
    pub phase: Phase,
    /// Ticks since the last heartbeat (as counted by the engine)
    pub elapsed_since_heartbeat: u32,
    /// Power line is high
    pub powered: bool,
    /// Reset line is driven low
    pub reset_asserted: bool,
    /// Ticks since reset was asserted; zero when no pulse is running
    pub reset_elapsed: u32,
    /// Heartbeat level seen by the edge detector
    pub last_input_level: bool,
}

/// Heartbeat supervisor
pub struct Supervisor<E, R, P> {
    config: DelayConfig,
    engine: E,
    edge: EdgeDetector,
    phase: Phase,
    reset_elapsed: u32,
    episodes: u32,
    reset: R,
    power: P,
}

impl<E, R, P> Supervisor<E, R, P>
where
    E: TimeoutEngine,
    R: OutputPin,
    P: OutputPin,
{
    /// Create a supervisor with the engine built from `config`
    ///
    /// Both outputs are driven low immediately.
    pub fn new(config: DelayConfig, reset: R, power: P) -> Self {
        let engine = E::from_config(&config);
        Self::with_engine(config, engine, reset, power)
    }

    /// Create a supervisor around an already constructed engine
    pub fn with_engine(config: DelayConfig, engine: E, reset: R, power: P) -> Self {
        let mut supervisor = Self {
            config,
            engine,
            edge: EdgeDetector::new(false),
            phase: Phase::Boot,
            reset_elapsed: 0,
            episodes: 0,
            reset,
            power,
        };
        supervisor.drive_outputs();
        supervisor
    }

    /// Finish startup: release reset, power the device, start timing
    ///
    /// `heartbeat_level` is the current heartbeat input. It must be low:
    /// the device has no power yet, so a high line means a wiring fault or a
    /// back-powered device. The caller waits for it to drop and retries.
    pub fn start(&mut self, heartbeat_level: bool) -> Result<(), SupervisorError> {
        if self.phase != Phase::Boot {
            return Err(SupervisorError::AlreadyStarted);
        }
        if heartbeat_level {
            return Err(SupervisorError::HeartbeatHigh);
        }

        self.edge = EdgeDetector::new(heartbeat_level);
        self.engine.rearm();
        self.apply(Event::Started);
        Ok(())
    }

    /// Account for one tick of the time base
    ///
    /// The reset pulse is evaluated before the timeout, so a pulse that
    /// completes on the same tick as a fresh timeout is always released.
    pub fn on_tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if self.phase.pulse_running() {
            self.reset_elapsed = self.reset_elapsed.saturating_add(1);
            if self.reset_elapsed >= self.config.reset_pulse_ticks {
                self.apply(Event::ResetPulseComplete);
                outcome.reset_released = true;
            }
        }

        if self.phase.powered() && self.engine.tick() {
            self.apply(Event::Timeout);
            outcome.timed_out = true;
        }

        outcome
    }

    /// Feed a sample of the heartbeat input
    ///
    /// Returns `Some` only for a low-to-high transition.
    pub fn on_input_level(&mut self, level: bool) -> Option<HeartbeatOutcome> {
        if self.edge.sample(level) {
            Some(self.on_heartbeat())
        } else {
            None
        }
    }

    /// Handle a rising edge that has already been detected
    pub fn on_heartbeat(&mut self) -> HeartbeatOutcome {
        if self.phase == Phase::Boot {
            return HeartbeatOutcome::Ignored;
        }

        let was_powered = self.phase.powered();
        self.engine.rearm();
        self.apply(Event::Heartbeat);

        if !was_powered && self.phase.powered() {
            HeartbeatOutcome::PowerRestored
        } else {
            HeartbeatOutcome::Rearmed
        }
    }

    /// Whether the tick source has anything to count
    ///
    /// False while the device is unpowered and the reset pulse is done:
    /// only a heartbeat can change anything then.
    pub fn wants_ticks(&self) -> bool {
        self.phase.powered() || self.phase.pulse_running()
    }

    /// Start or stop `timer` to match [`Self::wants_ticks`]
    ///
    /// Returns whether the timer is running afterwards.
    pub fn sync_timer<T: TickTimer>(&self, timer: &mut T) -> bool {
        let wanted = self.wants_ticks();
        if wanted && !timer.is_running() {
            timer.start();
        } else if !wanted && timer.is_running() {
            timer.stop();
        }
        wanted
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Timing configuration in use
    pub fn config(&self) -> &DelayConfig {
        &self.config
    }

    /// Failure episodes since boot
    pub fn episodes(&self) -> u32 {
        self.episodes
    }

    /// Snapshot for logging and tests
    pub fn state(&self) -> SupervisorState {
        SupervisorState {
            phase: self.phase,
            elapsed_since_heartbeat: self.engine.elapsed_ticks(),
            powered: self.phase.powered(),
            reset_asserted: self.phase.reset_asserted(),
            reset_elapsed: if self.phase.pulse_running() {
                self.reset_elapsed
            } else {
                0
            },
            last_input_level: self.edge.level(),
        }
    }

    fn apply(&mut self, event: Event) {
        let next = self.phase.transition(event);
        if next == self.phase {
            return;
        }

        if event == Event::Timeout {
            self.reset_elapsed = 0;
            self.episodes = self.episodes.wrapping_add(1);
        }

        self.phase = next;
        self.drive_outputs();
    }

    /// Drive both lines from the current phase in one update
    fn drive_outputs(&mut self) {
        self.reset.set_state(!self.phase.reset_asserted());
        self.power.set_state(self.phase.powered());
    }
}
