//! Cycle controller
//!
//! Owns every piece of per-cycle state and performs the stage transitions:
//!
//! ```text
//!   Idle ──PeriodElapsed──▶ Sampling ──4th ChannelConverted──▶ Transmitting
//!    ▲                                                              │
//!    └───────────────────────6th ByteSent──────────────────────────┘
//! ```
//!
//! Handlers run to completion and never block. Each returns the commands the
//! firmware must apply to the peripherals.

use super::buffer::{ConversionCounter, SampleBuffer, TransmitCursor, CHANNEL_COUNT};
use super::command::{Command, Commands};
use super::gate::{CycleGate, GateError};
use crate::state::{CycleEvent, Phase, Stage};

/// Errors returned by a rejected transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransitionError {
    /// Event came from a stage whose source is disabled
    StageDisarmed { stage: Stage, phase: Phase },
    /// Gate refused a hand-off
    Gate(GateError),
    /// Command list capacity exceeded
    CommandOverflow,
}

impl From<GateError> for TransitionError {
    fn from(e: GateError) -> Self {
        TransitionError::Gate(e)
    }
}

fn push(commands: &mut Commands, command: Command) -> Result<(), TransitionError> {
    commands
        .push(command)
        .map_err(|_| TransitionError::CommandOverflow)
}

/// The sampling cycle
#[derive(Debug, Clone)]
pub struct Cycle {
    phase: Phase,
    gate: CycleGate,
    samples: SampleBuffer,
    conversions: ConversionCounter,
    cursor: TransmitCursor,
    /// Timer overflow seen while the scheduler was disarmed
    overflow_latched: bool,
    frames_sent: u32,
}

impl Default for Cycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Cycle {
    /// Power-on state: idle, scheduler armed
    pub const fn new() -> Self {
        Self {
            phase: Phase::Idle,
            gate: CycleGate::new(),
            samples: [0; CHANNEL_COUNT],
            conversions: ConversionCounter::new(),
            cursor: TransmitCursor::new(),
            overflow_latched: false,
            frames_sent: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn gate(&self) -> &CycleGate {
        &self.gate
    }

    /// Sample buffer contents
    ///
    /// Only meaningful while transmitting or after a completed cycle.
    pub fn samples(&self) -> &SampleBuffer {
        &self.samples
    }

    pub fn conversions(&self) -> ConversionCounter {
        self.conversions
    }

    pub fn cursor(&self) -> &TransmitCursor {
        &self.cursor
    }

    pub fn overflow_latched(&self) -> bool {
        self.overflow_latched
    }

    /// Completed cycles since power-on (wrapping)
    pub fn frames_sent(&self) -> u32 {
        self.frames_sent
    }

    /// Process an event and return the commands to apply
    pub fn handle(&mut self, event: CycleEvent) -> Result<Commands, TransitionError> {
        let mut commands = Commands::new();
        match event {
            CycleEvent::PeriodElapsed => self.on_period_elapsed(&mut commands)?,
            CycleEvent::ChannelConverted(value) => {
                self.on_channel_converted(value, &mut commands)?
            }
            CycleEvent::ByteSent => self.on_byte_sent(&mut commands)?,
            CycleEvent::StageTimeout => self.recover_into(&mut commands)?,
        }
        Ok(commands)
    }

    /// Abandon the cycle in flight and re-arm the scheduler
    ///
    /// Not part of the normal cycle: a stage that never completes stalls the
    /// node forever unless the firmware opts into calling this.
    pub fn recover(&mut self) -> Result<Commands, TransitionError> {
        self.handle(CycleEvent::StageTimeout)
    }

    /// Scheduler: start a cycle
    fn on_period_elapsed(&mut self, commands: &mut Commands) -> Result<(), TransitionError> {
        if !self.gate.is_armed(Stage::Scheduler) {
            if self.phase.is_active() {
                // Stays pending until the pipeline re-arms the timer
                self.overflow_latched = true;
                return Ok(());
            }
            return Err(self.disarmed(Stage::Scheduler));
        }

        // Not re-entrant: the timer source is off until the pipeline finishes
        self.gate.hand_off(Stage::Scheduler)?;
        push(commands, Command::DisarmTimer)?;

        self.conversions.reset();
        push(commands, Command::StartConversion)?;

        self.phase = self.phase.advance();
        Ok(())
    }

    /// Sequencer: store a conversion, or hand off once the batch is full
    ///
    /// The hand-off happens on the completion event *after* the third store,
    /// never on the third store itself.
    fn on_channel_converted(
        &mut self,
        value: u16,
        commands: &mut Commands,
    ) -> Result<(), TransitionError> {
        if !self.gate.is_armed(Stage::Sequencer) {
            if self.phase == Phase::Transmitting {
                // Conversion that was in flight when the converter was stopped
                return Ok(());
            }
            return Err(self.disarmed(Stage::Sequencer));
        }

        if self.conversions.store(&mut self.samples, value) {
            return Ok(());
        }

        push(commands, Command::StopConverter)?;
        self.gate.hand_off(Stage::Sequencer)?;

        self.cursor.reset();
        if let Some(first) = self.cursor.next_byte(&self.samples) {
            push(commands, Command::LoadTxByte(first))?;
        }
        push(commands, Command::EnableTxInterrupt)?;

        self.phase = self.phase.advance();
        Ok(())
    }

    /// Pipeline: load the next byte, or finish and re-arm the scheduler
    fn on_byte_sent(&mut self, commands: &mut Commands) -> Result<(), TransitionError> {
        if !self.gate.is_armed(Stage::Pipeline) {
            return Err(self.disarmed(Stage::Pipeline));
        }

        if let Some(byte) = self.cursor.next_byte(&self.samples) {
            return push(commands, Command::LoadTxByte(byte));
        }

        push(commands, Command::DisableTxInterrupt)?;
        self.cursor.reset();
        self.gate.hand_off(Stage::Pipeline)?;

        self.phase = self.phase.advance();
        self.frames_sent = self.frames_sent.wrapping_add(1);
        self.rearm_scheduler(commands)
    }

    fn recover_into(&mut self, commands: &mut Commands) -> Result<(), TransitionError> {
        match self.phase {
            Phase::Idle => return Ok(()),
            Phase::Sampling => push(commands, Command::StopConverter)?,
            Phase::Transmitting => push(commands, Command::DisableTxInterrupt)?,
        }

        self.gate.clear();
        self.gate.arm(Stage::Scheduler)?;
        self.cursor.reset();
        self.phase = Phase::Idle;
        self.rearm_scheduler(commands)
    }

    /// Sole re-arm point of the ring
    fn rearm_scheduler(&mut self, commands: &mut Commands) -> Result<(), TransitionError> {
        push(commands, Command::ArmTimer)?;

        if core::mem::take(&mut self.overflow_latched) {
            // A pending overflow fires as soon as its interrupt is enabled
            self.on_period_elapsed(commands)?;
        }
        Ok(())
    }

    fn disarmed(&self, stage: Stage) -> TransitionError {
        TransitionError::StageDisarmed {
            stage,
            phase: self.phase,
        }
    }
}
