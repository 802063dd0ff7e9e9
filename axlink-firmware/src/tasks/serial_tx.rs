//! Serial transmit task
//!
//! Shifts out each loaded byte and reports completion while the transmit
//! interrupt is enabled.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;
use portable_atomic::Ordering;

use axlink_core::state::CycleEvent;

use crate::channels::{CYCLE_EVENTS, TX_BYTE, TX_IRQ_ENABLED};

#[embassy_executor::task]
pub async fn serial_tx_task(mut tx: BufferedUartTx) {
    info!("Serial TX task started");

    loop {
        let byte = TX_BYTE.receive().await;

        // A failed write is never reported, so the pipeline waits for it
        if let Err(e) = tx.write_all(&[byte]).await {
            warn!("Serial write failed: {:?}", e);
            continue;
        }
        if let Err(e) = tx.flush().await {
            warn!("Serial flush failed: {:?}", e);
            continue;
        }

        if TX_IRQ_ENABLED.load(Ordering::Acquire) {
            CYCLE_EVENTS.send(CycleEvent::ByteSent).await;
        }
    }
}
