//! Build-time node configuration
//!
//! Values come from node.toml, validated by build.rs.

use axlink_core::config::{NodeConfig, SamplingPeriod};
use axlink_hal::uart::SerialConfig;
use axlink_hal_rp2040::adc::AdcChannel;
use embassy_time::Duration;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/node_config.rs"));
}

pub use generated::{BAUDRATE, COMPARE, FIRST_CHANNEL, REFERENCE_HZ};

/// Node configuration compiled into the firmware
pub const NODE: NodeConfig = NodeConfig {
    sampling: SamplingPeriod::new(REFERENCE_HZ, COMPARE),
    baudrate: BAUDRATE,
    first_channel: FIRST_CHANNEL,
};

/// GPIO powering the accelerometer
pub const SENSOR_ENABLE_GPIO: u8 = 22;

/// GPIO carrying the serial output
pub const UART_TX_GPIO: u8 = 0;

/// Time for the converter reference and the sensor supply to settle
pub const ADC_SETTLE: Duration = Duration::from_millis(2);

/// Sampling period as a timer duration
pub fn sampling_period() -> Duration {
    Duration::from_micros(NODE.sampling.period_us() as u64)
}

/// Serial line settings (8N1)
pub fn serial_config() -> SerialConfig {
    NODE.serial()
}

/// Converter channel the sequence starts at
pub fn first_channel() -> AdcChannel {
    // build.rs limits the value to 0-3
    AdcChannel::from_index(NODE.first_channel).unwrap_or(AdcChannel::Adc3)
}
