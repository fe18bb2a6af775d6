use thiserror::Error;

/// Transport-level errors surfaced by the hosting node
#[derive(Error, Debug)]
pub enum NodeError {
    #[error("Subscription failed: {0}")]
    Subscribe(String),

    #[error("Unsubscribe failed: {0}")]
    Unsubscribe(String),

    #[error("Unknown subscription handle")]
    UnknownSubscription,
}

pub type NodeResult<T> = std::result::Result<T, NodeError>;
