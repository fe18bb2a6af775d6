//! Talos Core Domain
//!
//! Pure time domain types for the Talos middleware client.
//! This crate contains no I/O and is 100% unit testable.

mod error;
mod messages;
mod time;

pub use error::{TimeError, TimeResult};
pub use messages::{ClockMsg, TimeMsg};
pub use time::{ClockType, Time};
