//! Inter-task communication
//!
//! The atomic enable flags are the on-chip form of the cycle gate: each
//! hardware task only reports events while its flag is set, and only the
//! cycle task changes the flags.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicBool;

use axlink_core::state::CycleEvent;

/// Channel capacity for cycle events
const EVENT_QUEUE_SIZE: usize = 8;

/// Hardware events for the cycle task
pub static CYCLE_EVENTS: Channel<CriticalSectionRawMutex, CycleEvent, EVENT_QUEUE_SIZE> =
    Channel::new();

/// Start the conversion sequence
pub static ADC_START: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Byte loaded into the transmitter (one in flight at a time)
pub static TX_BYTE: Channel<CriticalSectionRawMutex, u8, 1> = Channel::new();

/// Period overflow reported to the cycle
pub static TIMER_ARMED: AtomicBool = AtomicBool::new(true);

/// Overflow that happened while the timer was disarmed
pub static OVERFLOW_PENDING: AtomicBool = AtomicBool::new(false);

/// Conversion completions reported to the cycle
pub static ADC_ENABLED: AtomicBool = AtomicBool::new(false);

/// Byte-sent completions reported to the cycle
pub static TX_IRQ_ENABLED: AtomicBool = AtomicBool::new(false);
