//! Per-cycle shared state
//!
//! The sample buffer is written by the sequencer and read by the pipeline.
//! Neither type here synchronises anything: exclusive access comes from the
//! cycle controller only ever running one stage at a time.

use axlink_protocol::SAMPLES_PER_FRAME;

/// Channels converted per cycle
pub const CHANNEL_COUNT: usize = SAMPLES_PER_FRAME;

/// Bytes transmitted per cycle
pub const BYTES_PER_CYCLE: u8 = (CHANNEL_COUNT * 2) as u8;

/// Samples of one cycle, in acquisition order
pub type SampleBuffer = [u16; CHANNEL_COUNT];

/// Number of channels converted in the current cycle (0..=3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConversionCounter(u8);

impl ConversionCounter {
    /// Create a counter at zero
    pub const fn new() -> Self {
        Self(0)
    }

    /// Current count
    pub fn get(self) -> u8 {
        self.0
    }

    /// All channels of the cycle have been stored
    pub fn is_complete(self) -> bool {
        self.0 as usize >= CHANNEL_COUNT
    }

    /// Store `value` at the next buffer slot and count it
    ///
    /// Returns `false` without touching the buffer once the count is
    /// complete.
    pub fn store(&mut self, samples: &mut SampleBuffer, value: u16) -> bool {
        if self.is_complete() {
            return false;
        }
        samples[self.0 as usize] = value;
        self.0 += 1;
        true
    }

    /// Reset at cycle start
    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

/// Position of the pipeline within the sample buffer
///
/// `byte_count` even selects the high byte of `sample_index`, odd selects the
/// low byte, after which `sample_index` moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransmitCursor {
    sample_index: u8,
    byte_count: u8,
}

impl TransmitCursor {
    /// Create a cursor at `(0, 0)`
    pub const fn new() -> Self {
        Self {
            sample_index: 0,
            byte_count: 0,
        }
    }

    /// Sample the next byte is taken from
    pub fn sample_index(&self) -> u8 {
        self.sample_index
    }

    /// Bytes loaded so far in this cycle
    pub fn byte_count(&self) -> u8 {
        self.byte_count
    }

    /// Check if the next byte is a high byte
    pub fn is_high_byte(&self) -> bool {
        self.byte_count % 2 == 0
    }

    /// All bytes of the cycle have been loaded
    pub fn is_finished(&self) -> bool {
        self.byte_count >= BYTES_PER_CYCLE
    }

    /// Take the next byte to load into the transmitter
    ///
    /// Returns `None` once all bytes of the cycle have been taken.
    pub fn next_byte(&mut self, samples: &SampleBuffer) -> Option<u8> {
        if self.is_finished() {
            return None;
        }

        let sample = samples[self.sample_index as usize];
        let byte = if self.is_high_byte() {
            (sample >> 8) as u8
        } else {
            self.sample_index += 1;
            sample as u8
        };
        self.byte_count += 1;
        Some(byte)
    }

    /// Reset when the pipeline is armed and when it finishes
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
