//! Node configuration types
//!
//! The node has no runtime configuration. These types describe the
//! build-time settings and check that they describe a node that can
//! actually keep up with its own period.

use axlink_hal::uart::SerialConfig;
#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::cycle::{BYTES_PER_CYCLE, CHANNEL_COUNT};

/// Default timer reference clock (low-frequency internal oscillator)
pub const DEFAULT_REFERENCE_HZ: u32 = 8_300;

/// Default compare value, one overflow every ~0.1 s
pub const DEFAULT_COMPARE: u32 = 830;

/// Default serial link speed
pub const DEFAULT_BAUDRATE: u32 = 115_200;

/// Default first channel of the descending conversion sequence
pub const DEFAULT_FIRST_CHANNEL: u8 = 3;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Timer reference clock is zero
    ZeroReference,
    /// Compare value is zero or does not fit the 16-bit timer
    CompareOutOfRange(u32),
    /// Baud rate is zero
    ZeroBaudrate,
    /// The conversion sequence is too short to produce the hand-off event
    SequenceTooShort { first_channel: u8 },
    /// Transmitting one frame takes longer than the sampling period
    FrameExceedsPeriod { frame_us: u32, period_us: u32 },
}

/// Sampling period as timer reference clock and compare value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(deny_unknown_fields))]
pub struct SamplingPeriod {
    /// Timer reference clock in Hz
    pub reference_hz: u32,
    /// Timer counts per period
    pub compare: u32,
}

impl Default for SamplingPeriod {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_HZ, DEFAULT_COMPARE)
    }
}

impl SamplingPeriod {
    pub const fn new(reference_hz: u32, compare: u32) -> Self {
        Self {
            reference_hz,
            compare,
        }
    }

    /// Period length in microseconds
    ///
    /// Returns 0 for a zero reference clock.
    pub const fn period_us(&self) -> u32 {
        if self.reference_hz == 0 {
            return 0;
        }
        ((self.compare as u64 * 1_000_000) / self.reference_hz as u64) as u32
    }

    /// Check the timer can actually be programmed with these values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reference_hz == 0 {
            return Err(ConfigError::ZeroReference);
        }
        if self.compare == 0 || self.compare > u16::MAX as u32 {
            return Err(ConfigError::CompareOutOfRange(self.compare));
        }
        Ok(())
    }
}

/// Complete node configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeConfig {
    pub sampling: SamplingPeriod,
    /// Serial link speed (8N1)
    pub baudrate: u32,
    /// Converter channel the descending sequence starts at
    pub first_channel: u8,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingPeriod::default(),
            baudrate: DEFAULT_BAUDRATE,
            first_channel: DEFAULT_FIRST_CHANNEL,
        }
    }
}

impl NodeConfig {
    /// Serial line settings (8N1)
    pub const fn serial(&self) -> SerialConfig {
        SerialConfig::eight_n_one(self.baudrate)
    }

    /// Time on the wire for one frame in microseconds
    pub const fn frame_us(&self) -> u32 {
        self.serial().transmit_time_us(BYTES_PER_CYCLE as u32)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sampling.validate()?;

        if self.baudrate == 0 {
            return Err(ConfigError::ZeroBaudrate);
        }

        // Three stored conversions plus the one whose completion hands off
        if (self.first_channel as usize) < CHANNEL_COUNT {
            return Err(ConfigError::SequenceTooShort {
                first_channel: self.first_channel,
            });
        }

        let frame_us = self.frame_us();
        let period_us = self.sampling.period_us();
        if frame_us >= period_us {
            return Err(ConfigError::FrameExceedsPeriod {
                frame_us,
                period_us,
            });
        }

        Ok(())
    }
}

/// Layout of the node configuration file
///
/// ```toml
/// [sampling]
/// reference_hz = 8300
/// compare = 830
///
/// [serial]
/// baudrate = 115200
///
/// [adc]
/// first_channel = 3
/// ```
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeFile {
    pub sampling: SamplingPeriod,
    pub serial: SerialSection,
    pub adc: AdcSection,
}

/// `[serial]` section
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SerialSection {
    pub baudrate: u32,
}

/// `[adc]` section
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdcSection {
    pub first_channel: u8,
}

#[cfg(feature = "serde")]
impl From<NodeFile> for NodeConfig {
    fn from(file: NodeFile) -> Self {
        Self {
            sampling: file.sampling,
            baudrate: file.serial.baudrate,
            first_channel: file.adc.first_channel,
        }
    }
}
