//! Simulation time.
//!
//! Time is a signed count of nanosecond ticks. Floating-point seconds are the
//! human-facing unit; the tick count is what gets stored in a [`Value`].
//!
//! [`Value`]: crate::model::Value

use std::fmt;

const TICKS_PER_SECOND: f64 = 1_000_000_000.0;

/// A simulation time value with nanosecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Time(i64);

impl Time {
    pub const ZERO: Time = Time(0);
    pub const MIN: Time = Time(i64::MIN);
    pub const MAX: Time = Time(i64::MAX);
    /// Smallest representable step.
    pub const EPSILON: Time = Time(1);

    /// Creates a time from a raw tick count.
    pub const fn from_ticks(ticks: i64) -> Self {
        Time(ticks)
    }

    /// Returns the raw tick count.
    pub const fn ticks(self) -> i64 {
        self.0
    }

    /// Creates a time from seconds, rounding to the nearest tick.
    ///
    /// Out-of-range values saturate to [`Time::MIN`]/[`Time::MAX`]; NaN maps
    /// to zero.
    pub fn from_seconds(seconds: f64) -> Self {
        Time((seconds * TICKS_PER_SECOND).round() as i64)
    }

    /// Returns this time in seconds.
    pub fn as_seconds(self) -> f64 {
        self.0 as f64 / TICKS_PER_SECOND
    }
}

impl From<Time> for f64 {
    fn from(t: Time) -> f64 {
        t.as_seconds()
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.as_seconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_roundtrip() {
        let t = Time::from_seconds(1.5);
        assert_eq!(t.ticks(), 1_500_000_000);
        assert_eq!(t.as_seconds(), 1.5);
    }

    #[test]
    fn test_from_seconds_rounds_to_nearest_tick() {
        assert_eq!(Time::from_seconds(1e-9 * 0.6).ticks(), 1);
        assert_eq!(Time::from_seconds(-2.0).ticks(), -2_000_000_000);
    }

    #[test]
    fn test_from_seconds_saturates() {
        assert_eq!(Time::from_seconds(1e300), Time::MAX);
        assert_eq!(Time::from_seconds(-1e300), Time::MIN);
        assert_eq!(Time::from_seconds(f64::NAN), Time::ZERO);
    }

    #[test]
    fn test_display() {
        assert_eq!(Time::from_seconds(0.25).to_string(), "0.25s");
    }
}
