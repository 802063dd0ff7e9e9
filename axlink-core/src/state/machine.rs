//! Cycle phases and stages
//!
//! A cycle is a ring of three stages. Exactly one of them owns the shared
//! sample state at any time; the phase says which.

/// The three stages of a sampling cycle, in ring order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    /// Periodic timer that starts a cycle
    Scheduler,
    /// Multi-channel conversion into the sample buffer
    Sequencer,
    /// Byte-by-byte serial transmission of the sample buffer
    Pipeline,
}

impl Stage {
    /// All stages in ring order
    pub const ALL: [Stage; 3] = [Stage::Scheduler, Stage::Sequencer, Stage::Pipeline];

    /// The stage this one hands control to when it finishes
    pub fn next(self) -> Self {
        match self {
            Stage::Scheduler => Stage::Sequencer,
            Stage::Sequencer => Stage::Pipeline,
            Stage::Pipeline => Stage::Scheduler,
        }
    }

    /// Bit used for this stage in the cycle gate
    pub(crate) fn mask(self) -> u8 {
        match self {
            Stage::Scheduler => 0b001,
            Stage::Sequencer => 0b010,
            Stage::Pipeline => 0b100,
        }
    }
}

/// Cycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Between cycles; only the scheduler is armed and the CPU sleeps
    #[default]
    Idle,
    /// Converter is filling the sample buffer
    Sampling,
    /// Transmitter is draining the sample buffer
    Transmitting,
}

impl Phase {
    /// Stage that owns the cycle state in this phase
    pub fn owner(self) -> Stage {
        match self {
            Phase::Idle => Stage::Scheduler,
            Phase::Sampling => Stage::Sequencer,
            Phase::Transmitting => Stage::Pipeline,
        }
    }

    /// Check if a cycle is in flight
    pub fn is_active(self) -> bool {
        !matches!(self, Phase::Idle)
    }

    /// Phase entered when the owning stage hands off
    pub fn advance(self) -> Self {
        match self {
            Phase::Idle => Phase::Sampling,
            Phase::Sampling => Phase::Transmitting,
            Phase::Transmitting => Phase::Idle,
        }
    }
}
