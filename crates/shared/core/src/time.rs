use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::{TimeError, TimeResult};
use crate::messages::TimeMsg;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// The source a clock derives its readings from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClockType {
    /// Wall-clock time from the operating system.
    #[default]
    System,
    /// Monotonic time, unaffected by wall-clock adjustments.
    Steady,
    /// Time injected by an outside authority, e.g. a simulator.
    External,
}

/// A point in time tagged with the clock type it came from.
///
/// Values are a non-negative nanosecond count since the clock's epoch.
/// Ordering is total over the nanosecond count; comparing values from
/// different clock types is allowed but does not order real time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    nanoseconds: u64,
    clock_type: ClockType,
}

impl Time {
    /// Construct directly from a nanosecond count.
    pub fn from_nanos(nanoseconds: u64, clock_type: ClockType) -> Self {
        Self {
            nanoseconds,
            clock_type,
        }
    }

    /// Construct from separate seconds and nanoseconds components.
    ///
    /// Fails if either component is negative.
    pub fn from_secs_and_nanos(secs: i64, nanos: i64, clock_type: ClockType) -> TimeResult<Self> {
        if secs < 0 || nanos < 0 {
            return Err(TimeError::InvalidArgument(
                "seconds and nanoseconds must not be negative".to_string(),
            ));
        }
        Ok(Self {
            nanoseconds: secs as u64 * NANOS_PER_SEC + nanos as u64,
            clock_type,
        })
    }

    /// Construct from the wire pair, tagging the value with `clock_type`.
    pub fn from_msg(msg: &TimeMsg, clock_type: ClockType) -> TimeResult<Self> {
        Self::from_secs_and_nanos(msg.sec as i64, msg.nanosec as i64, clock_type)
    }

    /// Split into the seconds/nanoseconds wire pair.
    ///
    /// Seconds wrap into the wire format's signed 32-bit range; the
    /// nanosecond remainder is always below one second and converts
    /// losslessly.
    pub fn to_msg(&self) -> TimeMsg {
        TimeMsg {
            sec: (self.nanoseconds / NANOS_PER_SEC) as i32,
            nanosec: (self.nanoseconds % NANOS_PER_SEC) as u32,
        }
    }

    pub fn nanoseconds(&self) -> u64 {
        self.nanoseconds
    }

    pub fn clock_type(&self) -> ClockType {
        self.clock_type
    }

    /// Interop view as a UTC datetime, where the value fits one.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(
            (self.nanoseconds / NANOS_PER_SEC) as i64,
            (self.nanoseconds % NANOS_PER_SEC) as u32,
        )
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:09}s",
            self.nanoseconds / NANOS_PER_SEC,
            self.nanoseconds % NANOS_PER_SEC
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero_system_time() {
        let time = Time::default();
        assert_eq!(time.nanoseconds(), 0);
        assert_eq!(time.clock_type(), ClockType::System);
    }

    #[test]
    fn test_from_nanos() {
        let time = Time::from_nanos(45, ClockType::System);
        assert_eq!(time.nanoseconds(), 45);
        assert_eq!(time.clock_type(), ClockType::System);
    }

    #[test]
    fn test_from_secs_and_nanos() {
        let time = Time::from_secs_and_nanos(0, 45, ClockType::System).unwrap();
        assert_eq!(time.nanoseconds(), 45);

        let time = Time::from_secs_and_nanos(42, 100, ClockType::Steady).unwrap();
        assert_eq!(time.nanoseconds(), 42_000_000_100);
        assert_eq!(time.clock_type(), ClockType::Steady);
    }

    #[test]
    fn test_negative_secs_rejected() {
        let result = Time::from_secs_and_nanos(-1, 0, ClockType::System);
        assert!(matches!(result, Err(TimeError::InvalidArgument(_))));
    }

    #[test]
    fn test_negative_nanos_rejected() {
        let result = Time::from_secs_and_nanos(0, -45, ClockType::System);
        assert!(matches!(result, Err(TimeError::InvalidArgument(_))));
    }

    #[test]
    fn test_from_msg() {
        let msg = TimeMsg {
            sec: 42,
            nanosec: 100,
        };
        let time = Time::from_msg(&msg, ClockType::System).unwrap();
        assert_eq!(time.nanoseconds(), 42_000_000_100);
        assert_eq!(time.clock_type(), ClockType::System);
    }

    #[test]
    fn test_from_msg_negative_secs_rejected() {
        let msg = TimeMsg {
            sec: -3,
            nanosec: 0,
        };
        assert!(Time::from_msg(&msg, ClockType::External).is_err());
    }

    #[test]
    fn test_to_msg_round_trip() {
        let time = Time::default();
        assert_eq!(time.to_msg(), TimeMsg { sec: 0, nanosec: 0 });

        let time = Time::from_secs_and_nanos(42, 100, ClockType::System).unwrap();
        assert_eq!(
            time.to_msg(),
            TimeMsg {
                sec: 42,
                nanosec: 100
            }
        );

        let time = Time::from_secs_and_nanos(0, 45, ClockType::System).unwrap();
        assert_eq!(time.to_msg(), TimeMsg { sec: 0, nanosec: 45 });
    }

    #[test]
    fn test_to_msg_truncates_seconds_to_wire_range() {
        // One past i32::MAX seconds wraps exactly like the wire format's
        // 32-bit cast.
        let secs = i32::MAX as u64 + 1;
        let time = Time::from_nanos(secs * 1_000_000_000 + 7, ClockType::System);
        let msg = time.to_msg();
        assert_eq!(msg.sec, i32::MIN);
        assert_eq!(msg.nanosec, 7);
    }

    #[test]
    fn test_ordering_over_nanoseconds() {
        let earlier = Time::from_nanos(10, ClockType::External);
        let later = Time::from_nanos(20, ClockType::External);
        assert!(earlier < later);
        assert_eq!(earlier, Time::from_nanos(10, ClockType::External));
    }

    #[test]
    fn test_to_datetime() {
        let time = Time::from_secs_and_nanos(1_700_000_000, 500, ClockType::System).unwrap();
        let dt = time.to_datetime().unwrap();
        assert_eq!(dt.timestamp(), 1_700_000_000);
        assert_eq!(dt.timestamp_subsec_nanos(), 500);
    }

    #[test]
    fn test_display() {
        let time = Time::from_secs_and_nanos(5, 42, ClockType::System).unwrap();
        assert_eq!(time.to_string(), "5.000000042s");
    }
}
