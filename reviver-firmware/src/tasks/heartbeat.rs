//! Heartbeat task
//!
//! Waits on the edge interrupt of the heartbeat input and reports the
//! level on both sides of each pulse, so the supervisor's edge detector
//! sees every rising edge exactly once.

use defmt::*;

use reviver_core::HeartbeatOutcome;
use reviver_hal_rp2040::RpInput;

use crate::channels::{SharedSupervisor, TICK_WAKE};

#[embassy_executor::task]
pub async fn heartbeat_task(supervisor: &'static SharedSupervisor, mut heartbeat: RpInput<'static>) {
    info!("Heartbeat task started");

    loop {
        heartbeat.wait_for_rising_edge().await;

        match supervisor.lock(|cell| cell.borrow_mut().on_input_level(true)) {
            Some(HeartbeatOutcome::PowerRestored) => {
                info!("Heartbeat resumed: power restored");
                TICK_WAKE.signal(());
            }
            Some(HeartbeatOutcome::Rearmed) => trace!("Heartbeat"),
            Some(HeartbeatOutcome::Ignored) | None => {}
        }

        heartbeat.wait_for_low().await;
        supervisor.lock(|cell| {
            cell.borrow_mut().on_input_level(false);
        });
    }
}
