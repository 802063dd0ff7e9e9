//! Cycle task
//!
//! Owns the [`Cycle`] and is the only writer of the enable flags. Events are
//! handled one at a time and every returned command is applied before the
//! next event is taken, so no other task observes a half-applied transition.

use defmt::*;
use portable_atomic::Ordering;

use axlink_core::cycle::{Command, Cycle};
use axlink_core::state::CycleEvent;
use axlink_protocol::Axis;

use crate::channels::{
    ADC_ENABLED, ADC_START, CYCLE_EVENTS, OVERFLOW_PENDING, TIMER_ARMED, TX_BYTE, TX_IRQ_ENABLED,
};

#[embassy_executor::task]
pub async fn cycle_task() {
    info!("Cycle task started");

    let mut cycle = Cycle::new();

    loop {
        let event = next_event(&cycle).await;
        let frames_before = cycle.frames_sent();

        match cycle.handle(event) {
            Ok(commands) => {
                for command in commands {
                    execute(command);
                }
            }
            Err(e) => {
                warn!(
                    "Rejected {:?} from {:?} in {:?}: {:?}",
                    event,
                    event.source(),
                    cycle.phase(),
                    e
                );
                continue;
            }
        }

        if cycle.frames_sent() != frames_before {
            let samples = cycle.samples();
            trace!(
                "Frame {} sent: Z={} Y={} X={}",
                cycle.frames_sent(),
                samples[Axis::Z.index()],
                samples[Axis::Y.index()],
                samples[Axis::X.index()]
            );
        }
    }
}

#[cfg(not(feature = "stall-recovery"))]
async fn next_event(_cycle: &Cycle) -> CycleEvent {
    CYCLE_EVENTS.receive().await
}

/// Wait for the next event, giving up on a stage that takes a whole period
#[cfg(feature = "stall-recovery")]
async fn next_event(cycle: &Cycle) -> CycleEvent {
    use embassy_time::with_timeout;

    if !cycle.phase().is_active() {
        return CYCLE_EVENTS.receive().await;
    }

    match with_timeout(crate::config::sampling_period(), CYCLE_EVENTS.receive()).await {
        Ok(event) => event,
        Err(_) => {
            error!(
                "{:?} stalled in {:?}, abandoning cycle",
                cycle.phase().owner(),
                cycle.phase()
            );
            CycleEvent::StageTimeout
        }
    }
}

/// Apply one command to the peripherals
fn execute(command: Command) {
    match command {
        Command::ArmTimer => {
            TIMER_ARMED.store(true, Ordering::Release);
            // An overflow while disarmed fires as soon as the timer is armed
            if OVERFLOW_PENDING.swap(false, Ordering::AcqRel) {
                post(CycleEvent::PeriodElapsed);
            }
        }
        Command::DisarmTimer => TIMER_ARMED.store(false, Ordering::Release),
        Command::StartConversion => {
            ADC_ENABLED.store(true, Ordering::Release);
            ADC_START.signal(());
        }
        Command::StopConverter => ADC_ENABLED.store(false, Ordering::Release),
        Command::LoadTxByte(byte) => {
            if TX_BYTE.try_send(byte).is_err() {
                warn!("Transmitter busy, byte {=u8:#04x} dropped", byte);
            }
        }
        Command::EnableTxInterrupt => TX_IRQ_ENABLED.store(true, Ordering::Release),
        Command::DisableTxInterrupt => TX_IRQ_ENABLED.store(false, Ordering::Release),
    }
}

fn post(event: CycleEvent) {
    if CYCLE_EVENTS.try_send(event).is_err() {
        warn!("Event queue full, {:?} dropped", event);
    }
}
