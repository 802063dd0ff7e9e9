//! UART pin routing
//!
//! RP2040 has two UART peripherals with fixed pin options. The node only
//! uses a TX pin, and it must not collide with a converter input.

use crate::adc::AdcChannel;

/// UART peripheral identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartId {
    Uart0,
    Uart1,
}

/// Pin routing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoutingError {
    /// Pin has no UART function
    NotUartPin(u8),
    /// Pin is a UART RX pin
    NotTxPin(u8),
    /// Pin is also an ADC input
    AdcInput(u8),
}

/// Determine which UART can use a given GPIO pin
pub fn gpio_to_uart(gpio: u8) -> Option<UartId> {
    // UART0: GPIO 0/1, 12/13, 16/17, 28/29
    // UART1: GPIO 4/5, 8/9, 20/21, 24/25
    match gpio {
        0 | 1 | 12 | 13 | 16 | 17 | 28 | 29 => Some(UartId::Uart0),
        4 | 5 | 8 | 9 | 20 | 21 | 24 | 25 => Some(UartId::Uart1),
        _ => None,
    }
}

/// Check a pin can carry the node's serial output
pub fn tx_route(gpio: u8) -> Result<UartId, RoutingError> {
    let uart = gpio_to_uart(gpio).ok_or(RoutingError::NotUartPin(gpio))?;
    // TX is the lower pin of each pair
    if gpio % 2 == 1 {
        return Err(RoutingError::NotTxPin(gpio));
    }
    if AdcChannel::from_gpio(gpio).is_some() {
        return Err(RoutingError::AdcInput(gpio));
    }
    Ok(uart)
}

/// Build the embassy-rp driver configuration
#[cfg(feature = "embassy")]
pub fn to_embassy_config(config: &axlink_hal::uart::SerialConfig) -> embassy_rp::uart::Config {
    use axlink_hal::uart::{DataBits, Parity, StopBits};
    use embassy_rp::uart;

    let mut out = uart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    out.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    out
}
