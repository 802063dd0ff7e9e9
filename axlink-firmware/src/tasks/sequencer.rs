//! Conversion sequence task
//!
//! Converts the descending channel sequence once per start signal and
//! reports each completion while the converter is enabled.

use defmt::*;
use embassy_rp::adc::{Adc, Async, Channel};
use portable_atomic::Ordering;

use axlink_core::state::CycleEvent;
use axlink_hal_rp2040::adc::{descending_sequence, to_10_bit, AdcChannel};

use crate::channels::{ADC_ENABLED, ADC_START, CYCLE_EVENTS};

#[embassy_executor::task]
pub async fn sequencer_task(
    mut adc: Adc<'static, Async>,
    mut channels: [Channel<'static>; 4],
    first: AdcChannel,
) {
    info!("Sequencer task started, sequence starts at {}", first);

    loop {
        ADC_START.wait().await;

        for channel in descending_sequence(first) {
            if !ADC_ENABLED.load(Ordering::Acquire) {
                break;
            }

            let raw = match adc.read(&mut channels[channel.index() as usize]).await {
                Ok(raw) => raw,
                Err(e) => {
                    // The cycle waits for this conversion forever
                    warn!("Conversion on {} failed: {:?}", channel, e);
                    break;
                }
            };

            if ADC_ENABLED.load(Ordering::Acquire) {
                CYCLE_EVENTS
                    .send(CycleEvent::ChannelConverted(to_10_bit(raw)))
                    .await;
            }
        }
    }
}
