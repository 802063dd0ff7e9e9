//! ADC channel map
//!
//! RP2040 has a single ADC with four external inputs:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29
//!
//! The node converts a descending sequence starting at a configured channel.
//! The accelerometer outputs sit on the top three inputs; the sequence runs
//! one conversion past them, and that trailing completion is what hands the
//! samples to the transmitter.

/// Full-scale bits of the RP2040 converter
pub const NATIVE_BITS: u32 = 12;

/// Bits of a wire reading
pub const WIRE_BITS: u32 = 10;

/// ADC channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcChannel {
    /// ADC0 on GPIO26
    Adc0,
    /// ADC1 on GPIO27
    Adc1,
    /// ADC2 on GPIO28
    Adc2,
    /// ADC3 on GPIO29
    Adc3,
}

impl AdcChannel {
    /// Get channel from its index
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(AdcChannel::Adc0),
            1 => Some(AdcChannel::Adc1),
            2 => Some(AdcChannel::Adc2),
            3 => Some(AdcChannel::Adc3),
            _ => None,
        }
    }

    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Get the GPIO pin for this ADC channel
    pub fn gpio(&self) -> u8 {
        26 + self.index()
    }

    /// Get ADC channel from GPIO pin
    pub fn from_gpio(gpio: u8) -> Option<Self> {
        gpio.checked_sub(26).and_then(Self::from_index)
    }

    /// The channel converted after this one
    pub fn below(&self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }
}

/// Channels converted from `first` down to ADC0, in conversion order
pub fn descending_sequence(first: AdcChannel) -> impl Iterator<Item = AdcChannel> {
    core::iter::successors(Some(first), AdcChannel::below)
}

/// Right-justify a 12-bit conversion result into a 10-bit reading
pub fn to_10_bit(raw: u16) -> u16 {
    (raw & 0x0FFF) >> (NATIVE_BITS - WIRE_BITS)
}
