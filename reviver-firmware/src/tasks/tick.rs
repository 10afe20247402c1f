//! Tick task
//!
//! Drives the supervisor's time base. While the device is unpowered and the
//! reset pulse has finished there is nothing to count, so the timer is
//! stopped until the heartbeat task signals [`TICK_WAKE`].

use defmt::*;

use reviver_core::config::TICK_PERIOD_US;
use reviver_core::{Phase, TickOutcome};
use reviver_hal::TickTimer;
use reviver_hal_rp2040::PeriodicTick;

use crate::channels::SharedSupervisor;
#[cfg(not(feature = "heartbeat-polling"))]
use crate::channels::TICK_WAKE;

/// Gated tick task for edge-interrupt heartbeat detection
#[cfg(not(feature = "heartbeat-polling"))]
#[embassy_executor::task]
pub async fn tick_task(supervisor: &'static SharedSupervisor) {
    let mut tick = PeriodicTick::new(TICK_PERIOD_US);
    info!("Tick task started ({} us period)", tick.period_us());

    loop {
        let running = supervisor.lock(|cell| cell.borrow().sync_timer(&mut tick));
        if !running {
            debug!("Tick gated until next heartbeat ({})", tick.status());
            TICK_WAKE.wait().await;
            debug!("Tick resumed");
            continue;
        }

        tick.next().await;

        let (outcome, phase, episodes) = supervisor.lock(|cell| {
            let mut sup = cell.borrow_mut();
            let outcome = sup.on_tick();
            (outcome, sup.phase(), sup.episodes())
        });
        log_outcome(outcome, phase, episodes);
    }
}

/// Tick task that also polls the heartbeat input
///
/// Never gates: the input has to be sampled even while the device is
/// unpowered, or the recovering edge would be missed.
#[cfg(feature = "heartbeat-polling")]
#[embassy_executor::task]
pub async fn polling_tick_task(
    supervisor: &'static SharedSupervisor,
    heartbeat: reviver_hal_rp2040::RpInput<'static>,
) {
    use reviver_core::HeartbeatOutcome;
    use reviver_hal::InputPin;

    let mut tick = PeriodicTick::new(TICK_PERIOD_US);
    tick.start();
    info!("Polling tick task started ({})", tick.status());

    loop {
        tick.next().await;

        let level = heartbeat.is_high();
        let (edge, outcome, phase, episodes) = supervisor.lock(|cell| {
            let mut sup = cell.borrow_mut();
            let edge = sup.on_input_level(level);
            let outcome = sup.on_tick();
            (edge, outcome, sup.phase(), sup.episodes())
        });

        if edge == Some(HeartbeatOutcome::PowerRestored) {
            info!("Heartbeat resumed: power restored");
        }
        log_outcome(outcome, phase, episodes);
    }
}

fn log_outcome(outcome: TickOutcome, phase: Phase, episodes: u32) {
    if outcome.is_quiet() {
        return;
    }
    if outcome.reset_released {
        info!("Reset pulse complete ({})", phase);
    }
    if outcome.timed_out {
        warn!("Heartbeat timeout: reset asserted, power cut (episode {})", episodes);
    }
}
