//! Wire messages exchanged with the middleware graph.
//!
//! These mirror the generated message layer field for field; the core only
//! needs the time pair and the feed message that carries it.

use serde::{Deserialize, Serialize};

/// Wire representation of a point in time.
///
/// The wire format truncates both fields to 32 bits: seconds to a signed
/// count since the epoch, nanoseconds to the sub-second remainder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeMsg {
    pub sec: i32,
    pub nanosec: u32,
}

/// Message published on the external time feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockMsg {
    pub clock: TimeMsg,
}
