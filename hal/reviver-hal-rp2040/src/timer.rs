//! Periodic tick timer
//!
//! Wraps an `embassy-time` [`Ticker`]. The ticker schedules against absolute
//! deadlines, so a late wake-up does not shift later ticks and no tick is
//! lost while another task runs.

use embassy_time::{Duration, Ticker};

use reviver_hal::TickTimer;

pub struct PeriodicTick {
    ticker: Ticker,
    period_us: u32,
    running: bool,
}

impl PeriodicTick {
    /// Create a stopped tick timer
    pub fn new(period_us: u32) -> Self {
        Self {
            ticker: Ticker::every(Duration::from_micros(period_us as u64)),
            period_us,
            running: false,
        }
    }

    /// Wait for the next tick
    ///
    /// Only meaningful while running; callers check [`TickTimer::is_running`]
    /// and wait for a wake-up instead when stopped.
    pub async fn next(&mut self) {
        self.ticker.next().await;
    }
}

impl TickTimer for PeriodicTick {
    fn period_us(&self) -> u32 {
        self.period_us
    }

    fn start(&mut self) {
        if !self.running {
            self.ticker.reset();
            self.running = true;
        }
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
