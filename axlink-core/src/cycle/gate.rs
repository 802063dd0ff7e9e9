//! Cycle gate
//!
//! The set of stage enable bits. Arming a stage is how control is handed
//! over; the gate refuses to arm a second stage while another is armed.

use crate::state::Stage;

/// Errors raised by the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateError {
    /// Another stage still holds the gate
    Held(Stage),
    /// The stage was not armed
    NotArmed(Stage),
}

/// Stage enable bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleGate {
    bits: u8,
}

impl Default for CycleGate {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleGate {
    /// Power-on state: only the scheduler is armed
    pub const fn new() -> Self {
        Self { bits: 0b001 }
    }

    /// Check if a stage's source is enabled
    pub fn is_armed(&self, stage: Stage) -> bool {
        self.bits & stage.mask() != 0
    }

    /// The armed stage, if any
    pub fn armed(&self) -> Option<Stage> {
        Stage::ALL.into_iter().find(|s| self.is_armed(*s))
    }

    /// Enable a stage's source
    pub fn arm(&mut self, stage: Stage) -> Result<(), GateError> {
        match self.armed() {
            Some(holder) if holder != stage => Err(GateError::Held(holder)),
            _ => {
                self.bits |= stage.mask();
                Ok(())
            }
        }
    }

    /// Disable a stage's source
    pub fn disarm(&mut self, stage: Stage) -> Result<(), GateError> {
        if !self.is_armed(stage) {
            return Err(GateError::NotArmed(stage));
        }
        self.bits &= !stage.mask();
        Ok(())
    }

    /// Disable every source
    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Hand the gate from `from` to the stage after it
    pub fn hand_off(&mut self, from: Stage) -> Result<Stage, GateError> {
        self.disarm(from)?;
        let to = from.next();
        self.arm(to)?;
        Ok(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_on_scheduler_armed() {
        let gate = CycleGate::new();
        assert_eq!(gate.armed(), Some(Stage::Scheduler));
        assert!(!gate.is_armed(Stage::Sequencer));
        assert!(!gate.is_armed(Stage::Pipeline));
    }

    #[test]
    fn test_second_stage_refused() {
        let mut gate = CycleGate::new();
        assert_eq!(
            gate.arm(Stage::Pipeline),
            Err(GateError::Held(Stage::Scheduler))
        );
        // Re-arming the holder is harmless
        assert_eq!(gate.arm(Stage::Scheduler), Ok(()));
    }

    #[test]
    fn test_hand_off_ring() {
        let mut gate = CycleGate::new();
        assert_eq!(gate.hand_off(Stage::Scheduler), Ok(Stage::Sequencer));
        assert_eq!(gate.hand_off(Stage::Sequencer), Ok(Stage::Pipeline));
        assert_eq!(gate.hand_off(Stage::Pipeline), Ok(Stage::Scheduler));
        assert_eq!(gate.armed(), Some(Stage::Scheduler));
    }

    #[test]
    fn test_hand_off_from_disarmed_stage() {
        let mut gate = CycleGate::new();
        assert_eq!(
            gate.hand_off(Stage::Sequencer),
            Err(GateError::NotArmed(Stage::Sequencer))
        );
        assert_eq!(gate.armed(), Some(Stage::Scheduler));
    }

    #[test]
    fn test_clear() {
        let mut gate = CycleGate::new();
        gate.clear();
        assert_eq!(gate.armed(), None);
        assert_eq!(gate.arm(Stage::Pipeline), Ok(()));
    }
}
