//! axlink - Accelerometer Sensor Node Firmware
//!
//! Samples a three-axis analog accelerometer once per period and writes the
//! readings to the serial link as a 6-byte frame.
//!
//! A cycle passes through three stages, each started by the previous one:
//! the period timer starts the conversion sequence, the last conversion
//! hands the samples to the transmitter, and the last byte re-arms the
//! timer. Between cycles no task is ready and the executor sleeps.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use axlink_hal::bring_up;

use crate::board::NodeBoard;

mod board;
mod channels;
mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("axlink node starting...");

    let parts = match bring_up(NodeBoard::new()).and_then(NodeBoard::into_parts) {
        Ok(parts) => parts,
        Err(e) => {
            error!("Bring-up failed: {:?}", e);
            halt();
        }
    };

    info!(
        "Sampling every {} us, {} baud, sequence from {}",
        config::NODE.sampling.period_us(),
        config::NODE.baudrate,
        config::first_channel()
    );

    // Sensor outputs and converter reference need to settle before sampling
    Timer::after(config::ADC_SETTLE).await;

    // The supply pin must stay driven for the life of the node
    core::mem::forget(parts.sensor_power);

    spawner.spawn(tasks::cycle_task()).unwrap();
    spawner
        .spawn(tasks::sequencer_task(
            parts.adc,
            parts.channels,
            config::first_channel(),
        ))
        .unwrap();
    spawner.spawn(tasks::serial_tx_task(parts.tx)).unwrap();
    spawner
        .spawn(tasks::period_task(config::sampling_period()))
        .unwrap();

    info!("All tasks spawned, node running");
}

/// Stop here without resetting
fn halt() -> ! {
    loop {
        cortex_m::asm::wfe();
    }
}
