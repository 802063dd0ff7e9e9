//! Accelerometer Sample Frame Protocol
//!
//! This crate defines the byte stream the sensor node writes to its serial
//! link (115200 baud, 8N1). One frame is emitted per sampling cycle.
//!
//! # Frame Layout
//!
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────┬──────────┬──────────┐
//! │ S0 HIGH  │ S0 LOW   │ S1 HIGH  │ S1 LOW   │ S2 HIGH  │ S2 LOW   │
//! │ 1B       │ 1B       │ 1B       │ 1B       │ 1B       │ 1B       │
//! └──────────┴──────────┴──────────┴──────────┴──────────┴──────────┘
//! ```
//!
//! Samples appear in acquisition order (highest-numbered analog channel
//! first). Each sample is a 10-bit reading right-justified in 16 bits, sent
//! big-endian.
//!
//! There is no start marker, length, or checksum. A receiver must know the
//! frame size out of band, and a single dropped or inserted byte shifts every
//! following frame until the receiver is resynchronised by other means.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod reading;

pub use frame::{
    decode, decode_checked, encode, FrameDecoder, FrameError, FRAME_LEN, SAMPLES_PER_FRAME,
};
pub use reading::{Axis, Reading, READING_BITS, READING_MAX};
