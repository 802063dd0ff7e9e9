//! Embassy async tasks
//!
//! One task per peripheral plus the cycle task that owns the cycle state.
//! Tasks talk only through the statics in [`crate::channels`].

pub mod cycle;
pub mod period;
pub mod sequencer;
pub mod serial_tx;

pub use cycle::cycle_task;
pub use period::period_task;
pub use sequencer::sequencer_task;
pub use serial_tx::serial_tx_task;
