use thiserror::Error;

/// Domain-level errors for time value construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("Invalid time: {0}")]
    InvalidArgument(String),
}

pub type TimeResult<T> = std::result::Result<T, TimeError>;
