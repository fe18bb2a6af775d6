//! Process-wide native time support.
//!
//! Mirrors the lifetime of the underlying middleware context: call [`init`]
//! once before constructing clocks, and [`shutdown`] when the process is
//! done with time support. Clock construction before [`init`] fails with
//! [`ClockError::NotInitialized`] instead of aborting the process.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use talos_core::ClockType;

use crate::error::{ClockError, ClockResult};

static INITIALIZED: AtomicBool = AtomicBool::new(false);
static LIVE_CLOCKS: AtomicUsize = AtomicUsize::new(0);

/// Epoch for steady readings, anchored once at first init so monotonic
/// values stay comparable across init/shutdown cycles.
static STEADY_EPOCH: OnceLock<Instant> = OnceLock::new();

/// Initialize process-wide time support. Idempotent.
pub fn init() {
    STEADY_EPOCH.get_or_init(Instant::now);
    INITIALIZED.store(true, Ordering::SeqCst);
}

/// Tear down process-wide time support.
///
/// Clocks created earlier keep their handles and remain readable, but new
/// clocks cannot be constructed until [`init`] is called again.
pub fn shutdown() {
    INITIALIZED.store(false, Ordering::SeqCst);
    let live = LIVE_CLOCKS.load(Ordering::SeqCst);
    if live != 0 {
        log::warn!("time support shut down with {live} clock(s) still alive");
    }
}

pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::SeqCst)
}

/// Handle to a native time query, owned by exactly one [`Clock`]
/// (crate::Clock) and released on drop.
#[derive(Debug)]
pub(crate) struct NativeClock {
    clock_type: ClockType,
}

impl NativeClock {
    pub(crate) fn new(clock_type: ClockType) -> ClockResult<Self> {
        if !is_initialized() {
            return Err(ClockError::NotInitialized);
        }
        LIVE_CLOCKS.fetch_add(1, Ordering::SeqCst);
        Ok(Self { clock_type })
    }

    /// Current reading in nanoseconds.
    ///
    /// `External` clocks read the wall clock here; replacing that reading
    /// with an injected value is the owning clock's job, not this handle's.
    pub(crate) fn now_nanos(&self) -> u64 {
        match self.clock_type {
            ClockType::Steady => steady_nanos(),
            ClockType::System | ClockType::External => system_nanos(),
        }
    }
}

impl Drop for NativeClock {
    fn drop(&mut self) {
        LIVE_CLOCKS.fetch_sub(1, Ordering::SeqCst);
    }
}

fn system_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

fn steady_nanos() -> u64 {
    STEADY_EPOCH
        .get()
        .map(|epoch| epoch.elapsed().as_nanos() as u64)
        .unwrap_or_default()
}
