//! Host bench for cycle timing
//!
//! Stands in for the three peripherals with a discrete-time model: an
//! up-counting timer with an overflow flag, a converter walking a fixed
//! channel sequence, and a transmitter that takes one byte time per byte.
//! Commands from the cycle are applied exactly as the firmware applies them.

use std::collections::VecDeque;

use super::{Command, Cycle};
use crate::config::SamplingPeriod;
use crate::state::{CycleEvent, Phase};

/// Microseconds per conversion
const CONVERSION_US: u64 = 15;

/// Microseconds per byte at 115200 baud, 10 bits per character
const BYTE_US: u64 = 87;

/// Conversions the converter can run once started (three axes plus one)
const SEQUENCE_LEN: usize = 4;

struct Bench {
    cycle: Cycle,
    period_us: u64,
    now: u64,
    next_overflow: u64,
    timer_irq: bool,
    overflow_flag: bool,
    /// (time of next completion, channel position)
    converter: Option<(u64, usize)>,
    readings: [u16; SEQUENCE_LEN],
    tx_ready_at: Option<u64>,
    tx_irq: bool,
    pending: VecDeque<CycleEvent>,
    wire: Vec<(u64, u8)>,
    /// Phase seen whenever the scheduler's event was acted on
    cycle_starts: Vec<(u64, Phase)>,
}

impl Bench {
    fn new(period_us: u64, readings: [u16; SEQUENCE_LEN]) -> Self {
        Self {
            cycle: Cycle::new(),
            period_us,
            now: 0,
            next_overflow: period_us,
            timer_irq: true,
            overflow_flag: false,
            converter: None,
            readings,
            tx_ready_at: None,
            tx_irq: false,
            pending: VecDeque::new(),
            wire: Vec::new(),
            cycle_starts: Vec::new(),
        }
    }

    fn deliver(&mut self, event: CycleEvent) {
        self.pending.push_back(event);
        while let Some(event) = self.pending.pop_front() {
            if event == CycleEvent::PeriodElapsed {
                self.cycle_starts.push((self.now, self.cycle.phase()));
            }
            let commands = self.cycle.handle(event).unwrap();
            for command in commands {
                self.apply(command);
            }
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::ArmTimer => {
                self.timer_irq = true;
                if core::mem::take(&mut self.overflow_flag) {
                    self.pending.push_back(CycleEvent::PeriodElapsed);
                }
            }
            Command::DisarmTimer => self.timer_irq = false,
            Command::StartConversion => {
                self.converter = Some((self.now + CONVERSION_US, 0));
            }
            Command::StopConverter => self.converter = None,
            Command::LoadTxByte(byte) => {
                self.wire.push((self.now, byte));
                self.tx_ready_at = Some(self.now + BYTE_US);
            }
            Command::EnableTxInterrupt => self.tx_irq = true,
            Command::DisableTxInterrupt => self.tx_irq = false,
        }
    }

    fn run_until(&mut self, end: u64) {
        loop {
            let mut next = self.next_overflow;
            if let Some((t, _)) = self.converter {
                next = next.min(t);
            }
            if let Some(t) = self.tx_ready_at {
                next = next.min(t);
            }
            if next > end {
                self.now = end;
                return;
            }
            self.now = next;

            if self.now == self.next_overflow {
                self.next_overflow += self.period_us;
                if self.timer_irq {
                    self.deliver(CycleEvent::PeriodElapsed);
                } else {
                    self.overflow_flag = true;
                }
            }

            if let Some((t, position)) = self.converter {
                if t == self.now {
                    self.converter = (position + 1 < SEQUENCE_LEN)
                        .then_some((self.now + CONVERSION_US, position + 1));
                    self.deliver(CycleEvent::ChannelConverted(self.readings[position]));
                }
            }

            if self.tx_ready_at == Some(self.now) {
                self.tx_ready_at = None;
                if self.tx_irq {
                    self.deliver(CycleEvent::ByteSent);
                }
            }
        }
    }

    /// Start times of each 6-byte frame on the wire
    fn frame_starts(&self) -> Vec<u64> {
        self.wire.chunks(6).map(|chunk| chunk[0].0).collect()
    }
}

fn default_period_us() -> u64 {
    SamplingPeriod::default().period_us() as u64
}

#[test]
fn test_nothing_sent_before_first_period() {
    let period = default_period_us();
    let mut bench = Bench::new(period, [300, 512, 1023, 0]);
    bench.run_until(period - 1);
    assert!(bench.wire.is_empty());
    assert_eq!(bench.cycle.phase(), Phase::Idle);
}

#[test]
fn test_first_frame_after_one_period() {
    let period = default_period_us();
    let mut bench = Bench::new(period, [300, 512, 1023, 0]);
    bench.run_until(period + 10_000);

    let bytes: Vec<u8> = bench.wire.iter().map(|(_, b)| *b).collect();
    assert_eq!(bytes, [0x01, 0x2C, 0x02, 0x00, 0x03, 0xFF]);

    // Three stores plus the hand-off conversion, then the first byte
    assert_eq!(bench.wire[0].0, period + 4 * CONVERSION_US);
    assert_eq!(bench.cycle.phase(), Phase::Idle);
}

#[test]
fn test_frames_exactly_one_period_apart() {
    let period = default_period_us();
    let mut bench = Bench::new(period, [1, 2, 3, 4]);
    bench.run_until(5 * period + 10_000);

    let starts = bench.frame_starts();
    assert_eq!(starts.len(), 5);
    for pair in starts.windows(2) {
        assert_eq!(pair[1] - pair[0], period);
    }
    assert_eq!(bench.wire.len(), 30);
    assert_eq!(bench.cycle.frames_sent(), 5);
}

#[test]
fn test_early_finish_does_not_start_next_cycle_sooner() {
    let period = default_period_us();
    let mut bench = Bench::new(period, [1, 2, 3, 4]);

    // Cycle completes well inside the first period
    bench.run_until(period + 2_000);
    assert_eq!(bench.cycle.frames_sent(), 1);

    bench.run_until(2 * period - 1);
    assert_eq!(bench.wire.len(), 6);

    bench.run_until(2 * period + 2_000);
    assert_eq!(bench.wire.len(), 12);
}

#[test]
fn test_no_cycle_starts_while_one_is_in_flight() {
    // Period shorter than a cycle: overflows land mid-cycle
    let period = 300;
    let mut bench = Bench::new(period, [10, 20, 30, 40]);
    bench.run_until(20 * period);

    // Overflows during a cycle are held by the timer flag, never delivered
    assert!(!bench.cycle_starts.is_empty());
    for (_, phase) in &bench.cycle_starts {
        assert_eq!(*phase, Phase::Idle);
    }
    // Every frame is complete and intact despite the overruns
    let frames = bench.wire.len() / 6;
    assert!(frames >= 2);
    for chunk in bench.wire.chunks_exact(6) {
        let bytes: Vec<u8> = chunk.iter().map(|(_, b)| *b).collect();
        let frame: [u8; 6] = bytes.as_slice().try_into().unwrap();
        assert_eq!(axlink_protocol::decode(&frame), [10, 20, 30]);
    }
    // Frames never interleave: each begins after the previous one ended
    let starts = bench.frame_starts();
    for pair in starts.windows(2) {
        assert!(pair[1] - pair[0] >= 6 * BYTE_US);
    }
}

#[test]
fn test_timer_disarmed_for_whole_cycle() {
    let period = default_period_us();
    let mut bench = Bench::new(period, [5, 6, 7, 8]);

    bench.run_until(period);
    assert!(!bench.timer_irq);
    assert_eq!(bench.cycle.phase(), Phase::Sampling);

    bench.run_until(period + 4 * CONVERSION_US);
    assert!(!bench.timer_irq);
    assert_eq!(bench.cycle.phase(), Phase::Transmitting);

    bench.run_until(period + 4 * CONVERSION_US + 6 * BYTE_US);
    assert!(bench.timer_irq);
    assert_eq!(bench.cycle.phase(), Phase::Idle);
}
