//! RP2040 board bring-up
//!
//! Pin assignment:
//! - GPIO0: UART0 TX (serial output)
//! - GPIO22: accelerometer supply
//! - GPIO26..29: ADC0..ADC3 (the axes sit on ADC3, ADC2, ADC1)

use defmt::*;
use embassy_rp::adc::{self, Adc, Async};
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_rp::peripherals::{ADC, PIN_0, UART0};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUartTx};
use embassy_rp::{bind_interrupts, Peri, Peripherals};
use static_cell::StaticCell;

use axlink_hal::Board;
use axlink_hal_rp2040::uart::{to_embassy_config, tx_route, RoutingError, UartId};

use crate::config::{serial_config, UART_TX_GPIO};

bind_interrupts!(pub struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    ADC_IRQ_FIFO => adc::InterruptHandler;
});

/// Transmit buffer; one frame at most is ever queued
const TX_BUF_SIZE: usize = 16;

static TX_BUF: StaticCell<[u8; TX_BUF_SIZE]> = StaticCell::new();

/// Bring-up errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum BoardError {
    /// Step called out of order
    WrongStage,
    /// Serial output pin cannot be used
    Routing(RoutingError),
    /// Serial output pin belongs to a different UART
    WrongUart(UartId),
}

/// Peripherals routed to their pins, interrupts not yet enabled
struct Routed {
    sensor_power: Output<'static>,
    channels: [adc::Channel<'static>; 4],
    adc: Peri<'static, ADC>,
    uart: Peri<'static, UART0>,
    tx_pin: Peri<'static, PIN_0>,
}

/// Drivers handed to the tasks
pub struct Parts {
    /// Held high for as long as the node runs
    pub sensor_power: Output<'static>,
    pub adc: Adc<'static, Async>,
    /// Indexed by ADC channel number
    pub channels: [adc::Channel<'static>; 4],
    pub tx: BufferedUartTx,
}

enum Stage {
    Reset,
    Clocked(Peripherals),
    Routed(Routed),
    Running(Parts),
    Taken,
}

/// The sensor node board
pub struct NodeBoard {
    stage: Stage,
}

impl NodeBoard {
    pub fn new() -> Self {
        Self {
            stage: Stage::Reset,
        }
    }

    /// Take the drivers of a running board
    pub fn into_parts(self) -> Result<Parts, BoardError> {
        match self.stage {
            Stage::Running(parts) => Ok(parts),
            _ => Err(BoardError::WrongStage),
        }
    }

    fn take(&mut self) -> Stage {
        core::mem::replace(&mut self.stage, Stage::Taken)
    }
}

impl Board for NodeBoard {
    type Error = BoardError;

    fn disable_watchdog(&mut self) -> Result<(), BoardError> {
        if !matches!(self.stage, Stage::Reset) {
            return Err(BoardError::WrongStage);
        }
        embassy_rp::pac::WATCHDOG
            .ctrl()
            .modify(|w| w.set_enable(false));
        info!("Watchdog disabled");
        Ok(())
    }

    fn configure_clocks(&mut self) -> Result<(), BoardError> {
        let Stage::Reset = self.take() else {
            return Err(BoardError::WrongStage);
        };
        let p = embassy_rp::init(Default::default());
        self.stage = Stage::Clocked(p);
        info!("Clocks configured");
        Ok(())
    }

    fn configure_pins(&mut self) -> Result<(), BoardError> {
        match tx_route(UART_TX_GPIO) {
            Ok(UartId::Uart0) => {}
            Ok(other) => return Err(BoardError::WrongUart(other)),
            Err(e) => return Err(BoardError::Routing(e)),
        }

        let Stage::Clocked(p) = self.take() else {
            return Err(BoardError::WrongStage);
        };

        // Power the accelerometer before its outputs are sampled
        let sensor_power = Output::new(p.PIN_22, Level::High);

        let channels = [
            adc::Channel::new_pin(p.PIN_26, Pull::None),
            adc::Channel::new_pin(p.PIN_27, Pull::None),
            adc::Channel::new_pin(p.PIN_28, Pull::None),
            adc::Channel::new_pin(p.PIN_29, Pull::None),
        ];

        self.stage = Stage::Routed(Routed {
            sensor_power,
            channels,
            adc: p.ADC,
            uart: p.UART0,
            tx_pin: p.PIN_0,
        });
        info!("Pins routed, sensor powered");
        Ok(())
    }

    fn enable_interrupts(&mut self) -> Result<(), BoardError> {
        let Stage::Routed(routed) = self.take() else {
            return Err(BoardError::WrongStage);
        };

        let adc = Adc::new(routed.adc, Irqs, adc::Config::default());

        let tx_buf = TX_BUF.init([0u8; TX_BUF_SIZE]);
        let tx = BufferedUartTx::new(
            routed.uart,
            Irqs,
            routed.tx_pin,
            tx_buf,
            to_embassy_config(&serial_config()),
        );

        self.stage = Stage::Running(Parts {
            sensor_power: routed.sensor_power,
            adc,
            channels: routed.channels,
            tx,
        });
        info!("Converter and serial interrupts enabled");
        Ok(())
    }
}
