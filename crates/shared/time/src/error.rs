use talos_core::{ClockType, TimeError};
use talos_ports::NodeError;
use thiserror::Error;

/// Errors from clock and time source operations
#[derive(Error, Debug)]
pub enum ClockError {
    #[error("Time support is not initialized")]
    NotInitialized,

    #[error("{0:?} clocks do not accept external time overrides")]
    UnsupportedClockType(ClockType),

    #[error("Cannot attach a {0:?} clock to a time source")]
    InvalidClockType(ClockType),

    #[error("Time error: {0}")]
    Time(#[from] TimeError),

    #[error("Node error: {0}")]
    Node(#[from] NodeError),
}

pub type ClockResult<T> = std::result::Result<T, ClockError>;
