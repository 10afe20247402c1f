//! Reviver - Heartbeat Supervisor Firmware
//!
//! Watches a heartbeat line from a monitored device. When the heartbeats
//! stop for longer than the strap-selected timeout, the device is reset
//! and its power is cut until it starts beating again.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::Level;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use reviver_core::{DelayConfig, Supervisor, SupervisorError};
use reviver_hal::InputPin;
use reviver_hal_rp2040::{RpInput, RpOutput, StrapPins};

use crate::channels::{BoardSupervisor, SharedSupervisor};

#[macro_use]
mod board;
mod channels;
mod tasks;

static SUPERVISOR: StaticCell<SharedSupervisor> = StaticCell::new();

/// Interval between status log lines
const STATUS_INTERVAL_SECS: u64 = 60;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Reviver firmware starting...");

    let p = embassy_rp::init(Default::default());
    let pins = take_board_pins!(p);
    info!(
        "Board: heartbeat=gpio{} reset=gpio{} power=gpio{} strap=gpio{}",
        board::HEARTBEAT_GPIO,
        board::RESET_GPIO,
        board::POWER_GPIO,
        board::STRAP_GPIOS
    );

    // Hold the device in reset with power off until startup completes
    let reset = RpOutput::new(pins.reset, Level::Low);
    let power = RpOutput::new(pins.power, Level::Low);

    let [lsb, mid, msb] = pins.strap;
    let selector = match StrapPins::new(lsb, mid, msb, board::STRAP_PULL).read().await {
        Ok(selector) => selector,
        Err(e) => {
            error!("Strap read failed: {}", e);
            halt();
        }
    };

    let config = DelayConfig::from_selector(selector);
    info!(
        "Timeout {} ms (selector {}), {} ticks of {} us, reset pulse {} ticks",
        config.timeout_ms,
        selector.bits(),
        config.timeout_ticks,
        config.tick_period_us,
        config.reset_pulse_ticks
    );
    if !config.within_tolerance() {
        warn!("Realized timeout off by {} ppm", config.error_ppm());
    }

    let mut supervisor: BoardSupervisor = Supervisor::new(config, reset, power);
    let mut heartbeat = RpInput::new(pins.heartbeat, board::HEARTBEAT_PULL);

    // The device is unpowered, so a high heartbeat line is a fault
    loop {
        match supervisor.start(heartbeat.is_high()) {
            Ok(()) => break,
            Err(SupervisorError::HeartbeatHigh) => {
                warn!("Heartbeat line high while device unpowered, waiting");
                heartbeat.wait_for_low().await;
            }
            Err(e) => {
                error!("Supervisor start failed: {}", e);
                halt();
            }
        }
    }
    info!("Device powered, supervision active");

    let supervisor: &'static SharedSupervisor = SUPERVISOR.init(Mutex::new(RefCell::new(supervisor)));

    #[cfg(not(feature = "heartbeat-polling"))]
    {
        spawner.spawn(tasks::tick_task(supervisor)).unwrap();
        spawner.spawn(tasks::heartbeat_task(supervisor, heartbeat)).unwrap();
    }
    #[cfg(feature = "heartbeat-polling")]
    spawner.spawn(tasks::polling_tick_task(supervisor, heartbeat)).unwrap();

    info!("All tasks spawned");

    loop {
        Timer::after_secs(STATUS_INTERVAL_SECS).await;
        let (state, episodes) = supervisor.lock(|cell| {
            let sup = cell.borrow();
            (sup.state(), sup.episodes())
        });
        info!(
            "Status: {} failing={} powered={} since_heartbeat={} ticks episodes={}",
            state.phase,
            state.phase.is_failure(),
            state.powered,
            state.elapsed_since_heartbeat,
            episodes
        );
    }
}

/// Stop doing anything
///
/// The outputs are left as driven: reset asserted, power off.
fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
