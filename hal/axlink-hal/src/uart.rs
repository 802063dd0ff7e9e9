//! Serial line settings
//!
//! The node only ever transmits, at a fixed speed and framing chosen at build
//! time.

/// Serial line configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self::eight_n_one(115_200)
    }
}

impl SerialConfig {
    /// 8 data bits, no parity, 1 stop bit
    pub const fn eight_n_one(baudrate: u32) -> Self {
        Self {
            baudrate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }

    /// Line bits per character including start, parity and stop bits
    pub const fn bits_per_character(&self) -> u32 {
        let data = match self.data_bits {
            DataBits::Seven => 7,
            DataBits::Eight => 8,
        };
        let parity = match self.parity {
            Parity::None => 0,
            Parity::Even | Parity::Odd => 1,
        };
        let stop = match self.stop_bits {
            StopBits::One => 1,
            StopBits::Two => 2,
        };
        1 + data + parity + stop
    }

    /// Time to shift out `bytes` characters, rounded up to whole microseconds
    pub const fn transmit_time_us(&self, bytes: u32) -> u32 {
        if self.baudrate == 0 {
            return u32::MAX;
        }
        let bits = bytes as u64 * self.bits_per_character() as u64;
        (bits * 1_000_000).div_ceil(self.baudrate as u64) as u32
    }
}

/// Number of data bits per character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_115200_8n1() {
        let config = SerialConfig::default();
        assert_eq!(config.baudrate, 115_200);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, StopBits::One);
        assert_eq!(config.bits_per_character(), 10);
    }

    #[test]
    fn test_transmit_time() {
        let config = SerialConfig::default();
        assert_eq!(config.transmit_time_us(1), 87);
        assert_eq!(config.transmit_time_us(6), 521);
    }

    #[test]
    fn test_framing_overhead() {
        let config = SerialConfig {
            parity: Parity::Even,
            stop_bits: StopBits::Two,
            ..SerialConfig::default()
        };
        assert_eq!(config.bits_per_character(), 12);
    }
}
