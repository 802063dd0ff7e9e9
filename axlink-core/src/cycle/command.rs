//! Hardware commands emitted by the cycle
//!
//! The cycle never touches peripherals itself. Each handled event yields a
//! short, ordered list of commands that the firmware executes before it
//! handles the next event.

use heapless::Vec;

/// Most commands a single event can produce
///
/// Worst case is a pipeline finish that immediately starts a latched cycle:
/// disable TX, arm timer, disarm timer, start conversion.
pub const MAX_COMMANDS: usize = 4;

/// Commands for one handled event, in execution order
pub type Commands = Vec<Command, MAX_COMMANDS>;

/// A single peripheral action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Enable the sampling timer's overflow interrupt
    ArmTimer,
    /// Disable the sampling timer's overflow interrupt (the timer keeps counting)
    DisarmTimer,
    /// Point the converter at the first channel of the sequence and start it
    StartConversion,
    /// Clear the conversion-complete flag and disable the converter
    StopConverter,
    /// Write a byte to the serial transmit register
    LoadTxByte(u8),
    /// Enable the transmitter's byte-sent interrupt
    EnableTxInterrupt,
    /// Disable the transmitter's byte-sent interrupt
    DisableTxInterrupt,
}
