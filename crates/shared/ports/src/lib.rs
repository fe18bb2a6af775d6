//! Talos Ports
//!
//! Port definitions (traits) for the Talos middleware client.
//! These define the boundaries between the time core and the hosting node.

mod error;
mod node;
mod settings;

pub use error::{NodeError, NodeResult};
pub use node::{ClockMsgHandler, Node, SettingsHandle, SubscriptionHandle};
pub use settings::{Setting, SettingChangeResult, SettingValue, SettingsCallback};
