//! Board-agnostic core logic for the accelerometer node firmware
//!
//! This crate contains everything that does not touch a peripheral:
//!
//! - The sampling cycle (timer → converter → transmitter) as a state machine
//! - Stage gate, sample buffer and transmit cursor
//! - Node configuration types and validation
//!
//! The firmware feeds hardware events into [`cycle::Cycle`] and executes the
//! [`cycle::Command`]s it returns.

// Host tests and the cycle bench use std collections
#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod cycle;
pub mod state;
