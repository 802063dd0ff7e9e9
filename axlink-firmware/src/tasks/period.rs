//! Sampling period task
//!
//! Stands in for the free-running timer. Overflows keep happening while the
//! timer is disarmed; the latest one is held and delivered on re-arm, like
//! an interrupt flag.

use defmt::*;
use embassy_time::{Duration, Ticker};
use portable_atomic::Ordering;

use axlink_core::state::CycleEvent;

use crate::channels::{CYCLE_EVENTS, OVERFLOW_PENDING, TIMER_ARMED};

#[embassy_executor::task]
pub async fn period_task(period: Duration) {
    info!("Period task started ({} us)", period.as_micros());

    let mut ticker = Ticker::every(period);

    loop {
        ticker.next().await;

        if TIMER_ARMED.load(Ordering::Acquire) {
            if CYCLE_EVENTS.try_send(CycleEvent::PeriodElapsed).is_err() {
                warn!("Event queue full, period overflow dropped");
            }
        } else {
            OVERFLOW_PENDING.store(true, Ordering::Release);
        }
    }
}
