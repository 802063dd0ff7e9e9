//! Board bring-up ordering
//!
//! The node must come up in a fixed order:
//!
//! 1. Watchdog disabled
//! 2. Clocks configured
//! 3. Pins routed (sensor supply, converter inputs, serial TX)
//! 4. Interrupt sources enabled
//!
//! [`BringUp`] encodes that order in its type parameter, so enabling
//! interrupts on a board whose pins are not routed does not compile.

use core::marker::PhantomData;

/// Board-specific bring-up steps
pub trait Board {
    /// Error type for a failed step
    type Error;

    /// Stop the watchdog so the node never resets while sleeping
    fn disable_watchdog(&mut self) -> Result<(), Self::Error>;

    /// Configure the system clock and the timer reference clock
    fn configure_clocks(&mut self) -> Result<(), Self::Error>;

    /// Route converter inputs and serial TX, power the sensor
    fn configure_pins(&mut self) -> Result<(), Self::Error>;

    /// Enable the peripherals' interrupt sources
    fn enable_interrupts(&mut self) -> Result<(), Self::Error>;
}

/// Power-on state
pub struct Reset;

/// Watchdog stopped
pub struct WatchdogOff;

/// Clocks running
pub struct Clocked;

/// Pins routed
pub struct Routed;

/// A board part-way through bring-up
pub struct BringUp<B, S> {
    board: B,
    _state: PhantomData<S>,
}

impl<B, S> BringUp<B, S> {
    fn advance<T>(self) -> BringUp<B, T> {
        BringUp {
            board: self.board,
            _state: PhantomData,
        }
    }
}

impl<B: Board> BringUp<B, Reset> {
    pub fn new(board: B) -> Self {
        Self {
            board,
            _state: PhantomData,
        }
    }

    pub fn disable_watchdog(mut self) -> Result<BringUp<B, WatchdogOff>, B::Error> {
        self.board.disable_watchdog()?;
        Ok(self.advance())
    }
}

impl<B: Board> BringUp<B, WatchdogOff> {
    pub fn configure_clocks(mut self) -> Result<BringUp<B, Clocked>, B::Error> {
        self.board.configure_clocks()?;
        Ok(self.advance())
    }
}

impl<B: Board> BringUp<B, Clocked> {
    pub fn configure_pins(mut self) -> Result<BringUp<B, Routed>, B::Error> {
        self.board.configure_pins()?;
        Ok(self.advance())
    }
}

impl<B: Board> BringUp<B, Routed> {
    /// Finish configuration; interrupts are still disabled
    pub fn finish(self) -> Ready<B> {
        Ready { board: self.board }
    }
}

/// A fully configured board with interrupts still disabled
pub struct Ready<B> {
    board: B,
}

impl<B: Board> Ready<B> {
    /// Enable interrupts and hand the running board back
    pub fn enable_interrupts(mut self) -> Result<B, B::Error> {
        self.board.enable_interrupts()?;
        Ok(self.board)
    }
}

/// Run every step in order
pub fn bring_up<B: Board>(board: B) -> Result<B, B::Error> {
    BringUp::new(board)
        .disable_watchdog()?
        .configure_clocks()?
        .configure_pins()?
        .finish()
        .enable_interrupts()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Step {
        Watchdog,
        Clocks,
        Pins,
        Interrupts,
    }

    #[derive(Default)]
    struct MockBoard {
        steps: Vec<Step>,
        fail_at: Option<Step>,
    }

    impl MockBoard {
        fn record(&mut self, step: Step) -> Result<(), Step> {
            if self.fail_at == Some(step) {
                return Err(step);
            }
            self.steps.push(step);
            Ok(())
        }
    }

    impl Board for MockBoard {
        type Error = Step;

        fn disable_watchdog(&mut self) -> Result<(), Step> {
            self.record(Step::Watchdog)
        }

        fn configure_clocks(&mut self) -> Result<(), Step> {
            self.record(Step::Clocks)
        }

        fn configure_pins(&mut self) -> Result<(), Step> {
            self.record(Step::Pins)
        }

        fn enable_interrupts(&mut self) -> Result<(), Step> {
            self.record(Step::Interrupts)
        }
    }

    #[test]
    fn test_steps_run_in_order() {
        let board = bring_up(MockBoard::default()).unwrap();
        assert_eq!(
            board.steps,
            [Step::Watchdog, Step::Clocks, Step::Pins, Step::Interrupts]
        );
    }

    #[test]
    fn test_failed_step_stops_bring_up() {
        let board = MockBoard {
            fail_at: Some(Step::Clocks),
            ..MockBoard::default()
        };
        assert_eq!(bring_up(board).err(), Some(Step::Clocks));
    }

    #[test]
    fn test_interrupts_not_enabled_before_ready() {
        let ready = BringUp::new(MockBoard::default())
            .disable_watchdog()
            .unwrap()
            .configure_clocks()
            .unwrap()
            .configure_pins()
            .unwrap()
            .finish();
        assert!(!ready.board.steps.contains(&Step::Interrupts));

        let board = ready.enable_interrupts().unwrap();
        assert_eq!(board.steps.last(), Some(&Step::Interrupts));
    }
}
