//! Cycle state definitions
//!
//! The phase tag and event kinds shared by the cycle controller and the
//! firmware tasks that feed it.

pub mod events;
pub mod machine;

pub use events::CycleEvent;
pub use machine::{Phase, Stage};
