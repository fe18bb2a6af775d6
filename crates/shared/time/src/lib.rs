//! Talos Time
//!
//! Time authority for the Talos middleware client: every component that
//! asks for "now" goes through a [`Clock`], and a [`TimeSource`] can switch
//! a whole group of clocks between the process-native time sources and an
//! externally injected time.
//!
//! ## Overview
//!
//! ```text
//! "use_sim_time" setting ──┐
//!                          ├──▶ TimeSource ──▶ Clock (External)
//! "/clock" topic feed ─────┘        │
//!                                   └──▶ Clock (External)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use talos_time::{Clock, ClockType, TimeSource};
//!
//! talos_time::init();
//!
//! // Wall-clock time for ordinary callers
//! let wall = Clock::system()?;
//! let stamp = wall.now();
//!
//! // A clock driven by an outside authority
//! let sim = Clock::external()?;
//! let source = TimeSource::new();
//! source.attach_clock(sim.clone())?;
//! source.set_active(true)?;
//! ```

mod clock;
mod error;
mod native;
mod source;

pub use clock::Clock;
pub use error::{ClockError, ClockResult};
pub use native::{init, is_initialized, shutdown};
pub use source::{CLOCK_TOPIC, TimeSource, USE_SIM_TIME};

// Re-export the core value types for convenience
pub use talos_core::{ClockType, Time};
