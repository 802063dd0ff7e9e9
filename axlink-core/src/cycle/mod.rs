//! Sampling cycle
//!
//! The timer → converter → transmitter ring as a single-owner state machine.
//! Mutual exclusion over the sample buffer and counters comes from the
//! [`CycleGate`]: only the armed stage's events are acted on, and arming
//! happens only at hand-off points.

pub mod buffer;
pub mod command;
pub mod controller;
pub mod gate;

#[cfg(test)]
mod sim;

pub use buffer::{
    ConversionCounter, SampleBuffer, TransmitCursor, BYTES_PER_CYCLE, CHANNEL_COUNT,
};
pub use command::{Command, Commands, MAX_COMMANDS};
pub use controller::{Cycle, TransitionError};
pub use gate::{CycleGate, GateError};
