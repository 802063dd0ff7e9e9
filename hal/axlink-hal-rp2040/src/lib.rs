//! RP2040-specific HAL for the sensor node
//!
//! - ADC channel map and the descending conversion sequence
//! - UART pin routing checks
//!
//! With the `embassy` feature, [`uart::to_embassy_config`] maps the
//! chip-independent serial settings onto the embassy-rp driver config.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod adc;
pub mod uart;

pub use adc::{descending_sequence, to_10_bit, AdcChannel};
pub use uart::{gpio_to_uart, tx_route, RoutingError, UartId};
