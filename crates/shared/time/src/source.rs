use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use parking_lot::Mutex;

use talos_core::{ClockMsg, ClockType, Time};
use talos_ports::{
    ClockMsgHandler, Node, Setting, SettingChangeResult, SettingValue, SettingsCallback,
    SettingsHandle, SubscriptionHandle,
};

use crate::clock::Clock;
use crate::error::{ClockError, ClockResult};

/// Name of the boolean node setting that switches external time on and off.
pub const USE_SIM_TIME: &str = "use_sim_time";

/// Topic carrying external time updates.
pub const CLOCK_TOPIC: &str = "/clock";

/// Broadcaster that keeps a group of [`Clock`]s in step with an externally
/// injected time.
///
/// Two inputs drive the source once a hosting node is attached: the
/// `use_sim_time` boolean setting, and the `/clock` topic feed. While
/// active, the source holds exactly one feed subscription and forwards
/// every update to the attached clocks; toggling the setting switches the
/// whole group at once. Clocks can be attached and detached at any time,
/// including while updates are being delivered.
pub struct TimeSource {
    inner: Arc<SourceInner>,
}

struct SourceInner {
    /// Activation flag and last received update, always mutated together.
    state: Mutex<SourceState>,
    /// Attached clocks by registration id. Iterated from the feed thread
    /// while application threads attach and detach.
    clocks: DashMap<u64, Arc<Clock>>,
    next_clock_id: AtomicU64,
    /// Hosting node and the settings listener registered on it.
    host: Mutex<Option<HostBinding>>,
    /// Live feed subscription, present exactly while active with a host.
    subscription: Mutex<Option<FeedSubscription>>,
}

struct SourceState {
    active: bool,
    last_value: Time,
}

struct HostBinding {
    node: Arc<dyn Node>,
    settings_cb: SettingsHandle,
}

struct FeedSubscription {
    node: Arc<dyn Node>,
    handle: SubscriptionHandle,
}

impl TimeSource {
    /// Standalone source: inactive, no host, zero last value.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SourceInner {
                state: Mutex::new(SourceState {
                    active: false,
                    last_value: Time::from_nanos(0, ClockType::External),
                }),
                clocks: DashMap::new(),
                next_clock_id: AtomicU64::new(0),
                host: Mutex::new(None),
                subscription: Mutex::new(None),
            }),
        }
    }

    /// Create a source and attach it to `node`.
    pub fn with_host(node: Arc<dyn Node>) -> ClockResult<Self> {
        let source = Self::new();
        source.attach_host(node)?;
        Ok(source)
    }

    /// True while external time is authoritative for the attached clocks.
    pub fn is_active(&self) -> bool {
        self.inner.state.lock().active
    }

    /// Last update received on the feed; zero until one arrives.
    pub fn last_value(&self) -> Time {
        self.inner.state.lock().last_value
    }

    /// Switch external time on or off for every attached clock.
    ///
    /// When a host is attached, activation opens the feed subscription and
    /// deactivation tears it down. Transport failures surface here.
    pub fn set_active(&self, enabled: bool) -> ClockResult<()> {
        SourceInner::set_active(&self.inner, enabled)
    }

    /// Attach the hosting node this source listens on.
    ///
    /// Any previously attached node is detached first. Declares the
    /// `use_sim_time` setting (default `false`) if the node does not have
    /// it, applies its current value, and registers a listener so later
    /// changes toggle the source.
    pub fn attach_host(&self, node: Arc<dyn Node>) -> ClockResult<()> {
        self.detach_host()?;

        if !node.has_setting(USE_SIM_TIME) {
            node.declare_setting(USE_SIM_TIME, SettingValue::Bool(false));
        }
        let use_sim_time = match node.get_setting(USE_SIM_TIME) {
            SettingValue::Bool(enabled) => Some(enabled),
            SettingValue::NotSet => None,
            other => {
                log::warn!("the '{USE_SIM_TIME}' setting must be a boolean, got {other:?}");
                None
            }
        };

        let callback = SourceInner::settings_callback(Arc::downgrade(&self.inner));
        let settings_cb = node.add_settings_callback(callback);
        *self.inner.host.lock() = Some(HostBinding {
            node,
            settings_cb,
        });

        if let Some(enabled) = use_sim_time {
            SourceInner::set_active(&self.inner, enabled)?;
        }
        Ok(())
    }

    /// Detach the hosting node, deactivating external time first.
    ///
    /// No-op if no node is attached; safe to call repeatedly.
    pub fn detach_host(&self) -> ClockResult<()> {
        if self.inner.host.lock().is_none() {
            return Ok(());
        }
        SourceInner::set_active(&self.inner, false)?;
        let binding = self.inner.host.lock().take();
        if let Some(binding) = binding {
            binding.node.remove_settings_callback(binding.settings_cb);
        }
        Ok(())
    }

    /// Attach a clock so it follows this source.
    ///
    /// Only `External` clocks can be attached. The clock receives the
    /// source's last value first and the activation flag second, so it is
    /// never active on a stale default.
    pub fn attach_clock(&self, clock: Arc<Clock>) -> ClockResult<()> {
        if clock.clock_type() != ClockType::External {
            return Err(ClockError::InvalidClockType(clock.clock_type()));
        }
        let (last_value, active) = {
            let state = self.inner.state.lock();
            (state.last_value, state.active)
        };
        clock.set_override(last_value)?;
        clock.set_override_active(active)?;

        let id = self.inner.next_clock_id.fetch_add(1, Ordering::Relaxed);
        self.inner.clocks.insert(id, clock);
        Ok(())
    }

    /// Detach a clock. It keeps whatever override state it last received.
    pub fn detach_clock(&self, clock: &Arc<Clock>) {
        self.inner
            .clocks
            .retain(|_, attached| !Arc::ptr_eq(attached, clock));
    }
}

impl Default for TimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TimeSource {
    fn drop(&mut self) {
        // The node must not keep a listener or subscription for a dead
        // source.
        if let Err(err) = self.detach_host() {
            log::warn!("failed to detach host while dropping time source: {err}");
        }
    }
}

impl SourceInner {
    fn set_active(inner: &Arc<SourceInner>, enabled: bool) -> ClockResult<()> {
        {
            let mut state = inner.state.lock();
            if state.active == enabled {
                return Ok(());
            }
            state.active = enabled;
        }
        // Lock dropped before touching clocks or the node; the registry
        // iterates safely against concurrent attach/detach.
        for entry in inner.clocks.iter() {
            if let Err(err) = entry.value().set_override_active(enabled) {
                log::warn!("failed to toggle override on attached clock: {err}");
            }
        }
        if enabled {
            Self::open_feed(inner)
        } else {
            Self::close_feed(inner)
        }
    }

    /// Subscribe to the feed if a host is attached and no subscription
    /// exists yet. The slot stays locked across the transport call so a
    /// concurrent teardown cannot observe a half-open feed.
    fn open_feed(inner: &Arc<SourceInner>) -> ClockResult<()> {
        let node = {
            let host = inner.host.lock();
            match host.as_ref() {
                Some(binding) => binding.node.clone(),
                None => return Ok(()),
            }
        };
        let mut slot = inner.subscription.lock();
        if slot.is_some() {
            return Ok(());
        }
        let handler = Self::feed_handler(Arc::downgrade(inner));
        let handle = node.subscribe_clock(CLOCK_TOPIC, handler)?;
        *slot = Some(FeedSubscription { node, handle });
        Ok(())
    }

    /// Tear down the feed subscription, clearing the handle before the
    /// transport call returns so a re-activation never sees a stale one.
    fn close_feed(inner: &Arc<SourceInner>) -> ClockResult<()> {
        let mut slot = inner.subscription.lock();
        if let Some(subscription) = slot.take() {
            subscription.node.unsubscribe(subscription.handle)?;
        }
        Ok(())
    }

    fn feed_handler(weak: Weak<SourceInner>) -> ClockMsgHandler {
        Arc::new(move |msg: ClockMsg| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.handle_clock_msg(&msg);
        })
    }

    /// Runs on the transport's delivery thread.
    fn handle_clock_msg(&self, msg: &ClockMsg) {
        let update = match Time::from_msg(&msg.clock, ClockType::External) {
            Ok(update) => update,
            Err(err) => {
                log::warn!("ignoring invalid update on '{CLOCK_TOPIC}': {err}");
                return;
            }
        };
        let active = {
            let mut state = self.state.lock();
            state.last_value = update;
            state.active
        };
        // The feed is only subscribed while active; a delivery racing a
        // deactivation records the value but is not pushed.
        if !active {
            return;
        }
        for entry in self.clocks.iter() {
            if let Err(err) = entry.value().set_override(update) {
                log::warn!("failed to push time update to attached clock: {err}");
            }
        }
    }

    fn settings_callback(weak: Weak<SourceInner>) -> SettingsCallback {
        Arc::new(move |settings: &[Setting]| {
            for setting in settings {
                if setting.name != USE_SIM_TIME {
                    continue;
                }
                let Some(enabled) = setting.value.as_bool() else {
                    return SettingChangeResult::rejected(format!(
                        "the '{USE_SIM_TIME}' setting must be a boolean"
                    ));
                };
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                if let Err(err) = SourceInner::set_active(&inner, enabled) {
                    return SettingChangeResult::rejected(err.to_string());
                }
            }
            SettingChangeResult::accepted()
        })
    }
}
