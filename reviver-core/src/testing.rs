//! Mock hardware shared by the unit tests

use std::cell::Cell;
use std::rc::Rc;

use reviver_hal::{InputPin, OutputPin, TickTimer};

/// Output pin whose level can be observed through clones
#[derive(Debug, Clone)]
pub struct MockOutput {
    level: Rc<Cell<bool>>,
}

impl MockOutput {
    /// Start driven high, so tests can tell that the owner forced it low
    pub fn new() -> Self {
        Self {
            level: Rc::new(Cell::new(true)),
        }
    }

    pub fn high(&self) -> bool {
        self.level.get()
    }
}

impl OutputPin for MockOutput {
    fn set_high(&mut self) {
        self.level.set(true);
    }

    fn set_low(&mut self) {
        self.level.set(false);
    }

    fn is_set_high(&self) -> bool {
        self.level.get()
    }
}

/// Input pin with a settable level
#[derive(Debug)]
pub struct MockInput {
    level: Cell<bool>,
}

impl MockInput {
    pub fn new(level: bool) -> Self {
        Self {
            level: Cell::new(level),
        }
    }
}

impl InputPin for MockInput {
    fn is_high(&self) -> bool {
        self.level.get()
    }
}

/// Tick timer that only records gating calls
#[derive(Debug, Default)]
pub struct MockTimer {
    pub running: bool,
    pub starts: u32,
    pub stops: u32,
}

impl TickTimer for MockTimer {
    fn period_us(&self) -> u32 {
        crate::config::TICK_PERIOD_US
    }

    fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.starts += 1;
        }
    }

    fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.stops += 1;
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
