use std::sync::Arc;

use talos_core::ClockMsg;

use crate::error::NodeResult;
use crate::settings::{SettingValue, SettingsCallback};

/// Handle to a live topic subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(pub u64);

/// Handle to a registered settings-change listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettingsHandle(pub u64);

/// Handler invoked for each message on the external time feed.
///
/// Runs on whatever thread the transport delivers messages on.
pub type ClockMsgHandler = Arc<dyn Fn(ClockMsg) + Send + Sync>;

/// Port for the hosting node.
///
/// The time core uses this to read the node's settings, watch them for
/// changes, and subscribe to the external time feed. Implemented by the
/// middleware node layer.
pub trait Node: Send + Sync {
    fn has_setting(&self, name: &str) -> bool;

    /// Declare a setting with a default value. No effect if the setting
    /// is already declared.
    fn declare_setting(&self, name: &str, default: SettingValue);

    /// Current value of a setting, `NotSet` if it was never declared.
    fn get_setting(&self, name: &str) -> SettingValue;

    fn add_settings_callback(&self, callback: SettingsCallback) -> SettingsHandle;

    fn remove_settings_callback(&self, handle: SettingsHandle);

    /// Subscribe to a time feed topic.
    fn subscribe_clock(
        &self,
        topic: &str,
        handler: ClockMsgHandler,
    ) -> NodeResult<SubscriptionHandle>;

    fn unsubscribe(&self, handle: SubscriptionHandle) -> NodeResult<()>;
}
