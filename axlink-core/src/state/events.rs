//! Events that drive the cycle

use super::machine::Stage;

/// Hardware events delivered to the cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleEvent {
    /// Sampling timer reached its compare value
    PeriodElapsed,
    /// Converter finished one channel; carries the raw result
    ChannelConverted(u16),
    /// Transmitter accepted the last loaded byte and is ready for another
    ByteSent,
    /// A stage did not finish within its time bound (stall recovery only)
    StageTimeout,
}

impl CycleEvent {
    /// Stage whose interrupt source raises this event
    pub fn source(&self) -> Option<Stage> {
        match self {
            CycleEvent::PeriodElapsed => Some(Stage::Scheduler),
            CycleEvent::ChannelConverted(_) => Some(Stage::Sequencer),
            CycleEvent::ByteSent => Some(Stage::Pipeline),
            CycleEvent::StageTimeout => None,
        }
    }
}
