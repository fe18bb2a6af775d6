//! Lifecycle test for process-wide time support.
//!
//! Everything lives in a single test function: the init/shutdown state is
//! process-global, so the steps must run sequentially in their own binary.

use talos_time::{Clock, ClockError, ClockType};

#[test]
fn test_native_lifecycle() {
    let _ = env_logger::try_init();

    // Construction before init fails instead of aborting the process.
    assert!(!talos_time::is_initialized());
    assert!(matches!(Clock::system(), Err(ClockError::NotInitialized)));

    talos_time::init();
    assert!(talos_time::is_initialized());
    // init is idempotent.
    talos_time::init();

    let wall = Clock::system().unwrap();
    assert!(wall.now().nanoseconds() > 0);

    let steady = Clock::new(ClockType::Steady).unwrap();
    let first = steady.now();

    // Shutting down with clocks alive only blocks new construction; the
    // existing handles keep working.
    talos_time::shutdown();
    assert!(!talos_time::is_initialized());
    assert!(Clock::external().is_err());
    assert!(steady.now() >= first);

    drop(wall);
    drop(steady);

    // A fresh init recovers, and steady readings stay comparable across
    // the cycle.
    talos_time::init();
    let steady = Clock::new(ClockType::Steady).unwrap();
    assert!(steady.now() >= first);

    let external = Clock::external().unwrap();
    assert_eq!(external.clock_type(), ClockType::External);
}
