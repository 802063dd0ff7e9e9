//! axlink Hardware Abstraction Layer
//!
//! Chip-independent pieces of board support. Chip crates implement
//! [`bringup::Board`] and map [`uart::SerialConfig`] onto their drivers.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (axlink-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  axlink-hal (this crate)                │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  axlink-hal-rp2040                      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! - [`bringup::BringUp`] - Startup ordering as a typestate
//! - [`uart::SerialConfig`] - Serial line settings

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bringup;
pub mod uart;

pub use bringup::{bring_up, Board, BringUp, Ready};
pub use uart::SerialConfig;
