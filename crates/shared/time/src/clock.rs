use std::sync::Arc;

use parking_lot::Mutex;

use talos_core::{ClockType, Time};

use crate::error::{ClockError, ClockResult};
use crate::native::NativeClock;

/// A source of "now".
///
/// Readings are always tagged with the clock's type. `External` clocks can
/// have their native reading replaced by an injected value, usually pushed
/// by a [`TimeSource`](crate::TimeSource); other clock types reject the
/// override operations.
pub struct Clock {
    clock_type: ClockType,
    inner: Mutex<ClockInner>,
}

/// State behind the per-clock lock: the native handle and the override
/// pair, which must only ever be observed together.
struct ClockInner {
    native: NativeClock,
    override_active: bool,
    override_value: Time,
}

impl Clock {
    /// Create a clock of the given type.
    ///
    /// Fails with [`ClockError::NotInitialized`] if process-wide time
    /// support has not been initialized yet.
    pub fn new(clock_type: ClockType) -> ClockResult<Arc<Self>> {
        let native = NativeClock::new(clock_type)?;
        Ok(Arc::new(Self {
            clock_type,
            inner: Mutex::new(ClockInner {
                native,
                override_active: false,
                override_value: Time::from_nanos(0, clock_type),
            }),
        }))
    }

    /// Wall-clock time, the default for ordinary callers.
    pub fn system() -> ClockResult<Arc<Self>> {
        Self::new(ClockType::System)
    }

    /// A clock that accepts externally injected time.
    pub fn external() -> ClockResult<Arc<Self>> {
        Self::new(ClockType::External)
    }

    pub fn clock_type(&self) -> ClockType {
        self.clock_type
    }

    /// Current time according to this clock.
    pub fn now(&self) -> Time {
        let inner = self.inner.lock();
        if self.clock_type == ClockType::External && inner.override_active {
            return inner.override_value;
        }
        Time::from_nanos(inner.native.now_nanos(), self.clock_type)
    }

    /// Whether the injected value currently replaces the native reading.
    pub fn is_override_active(&self) -> bool {
        self.inner.lock().override_active
    }

    /// Enable or disable the external time override.
    pub fn set_override_active(&self, enabled: bool) -> ClockResult<()> {
        if self.clock_type != ClockType::External {
            return Err(ClockError::UnsupportedClockType(self.clock_type));
        }
        self.inner.lock().override_active = enabled;
        Ok(())
    }

    /// Store the override value without changing the activation flag.
    pub fn set_override(&self, time: Time) -> ClockResult<()> {
        if self.clock_type != ClockType::External {
            return Err(ClockError::UnsupportedClockType(self.clock_type));
        }
        // Re-tag so now() never leaks a foreign clock type.
        self.inner.lock().override_value = Time::from_nanos(time.nanoseconds(), self.clock_type);
        Ok(())
    }
}
