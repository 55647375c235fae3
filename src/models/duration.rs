use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use crate::parse::ParseError;

pub const TICKS_PER_MICROSECOND: i64 = 10;
pub const TICKS_PER_MILLISECOND: i64 = 10_000;
pub const TICKS_PER_SECOND: i64 = 10_000_000;
pub const TICKS_PER_MINUTE: i64 = 60 * TICKS_PER_SECOND;
pub const TICKS_PER_HOUR: i64 = 60 * TICKS_PER_MINUTE;
pub const TICKS_PER_DAY: i64 = 24 * TICKS_PER_HOUR;
pub const TICKS_PER_WEEK: i64 = 7 * TICKS_PER_DAY;

/// Signed span of time counted in 100ns ticks
///
/// A tick is the smallest representable increment. Parsed quantities finer
/// than one tick are rejected by the parser rather than rounded to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Duration {
    ticks: i64,
}

impl Duration {
    pub const ZERO: Duration = Duration { ticks: 0 };

    pub const fn from_ticks(ticks: i64) -> Self {
        Duration { ticks }
    }

    pub const fn from_weeks(weeks: i64) -> Self {
        Duration::from_ticks(weeks * TICKS_PER_WEEK)
    }

    pub const fn from_days(days: i64) -> Self {
        Duration::from_ticks(days * TICKS_PER_DAY)
    }

    pub const fn from_hours(hours: i64) -> Self {
        Duration::from_ticks(hours * TICKS_PER_HOUR)
    }

    pub const fn from_minutes(minutes: i64) -> Self {
        Duration::from_ticks(minutes * TICKS_PER_MINUTE)
    }

    pub const fn from_seconds(seconds: i64) -> Self {
        Duration::from_ticks(seconds * TICKS_PER_SECOND)
    }

    pub const fn from_millis(millis: i64) -> Self {
        Duration::from_ticks(millis * TICKS_PER_MILLISECOND)
    }

    pub const fn from_micros(micros: i64) -> Self {
        Duration::from_ticks(micros * TICKS_PER_MICROSECOND)
    }

    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    pub const fn is_zero(&self) -> bool {
        self.ticks == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.ticks < 0
    }

    pub fn abs(&self) -> Self {
        Duration::from_ticks(self.ticks.abs())
    }

    pub fn checked_add(&self, rhs: Duration) -> Option<Duration> {
        self.ticks.checked_add(rhs.ticks).map(Duration::from_ticks)
    }

    pub fn checked_sub(&self, rhs: Duration) -> Option<Duration> {
        self.ticks.checked_sub(rhs.ticks).map(Duration::from_ticks)
    }

    pub fn checked_neg(&self) -> Option<Duration> {
        self.ticks.checked_neg().map(Duration::from_ticks)
    }

    pub fn as_seconds_f64(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_SECOND as f64
    }

    /// Convert to `std::time::Duration`; `None` for negative values
    pub fn to_std(&self) -> Option<std::time::Duration> {
        if self.ticks < 0 {
            return None;
        }
        let secs = (self.ticks / TICKS_PER_SECOND) as u64;
        let nanos = ((self.ticks % TICKS_PER_SECOND) * 100) as u32;
        Some(std::time::Duration::new(secs, nanos))
    }
}

impl From<Duration> for chrono::Duration {
    fn from(value: Duration) -> Self {
        let secs = value.ticks / TICKS_PER_SECOND;
        let rem_ticks = value.ticks % TICKS_PER_SECOND;
        chrono::Duration::seconds(secs) + chrono::Duration::nanoseconds(rem_ticks * 100)
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        self.checked_add(rhs).expect("overflow when adding durations")
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        self.checked_sub(rhs).expect("overflow when subtracting durations")
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        self.checked_neg().expect("overflow when negating duration")
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Duration>>(iter: I) -> Duration {
        iter.fold(Duration::ZERO, |acc, d| acc + d)
    }
}

/// Canonical form: `1d2h3m4.5s`, `-90s`, `0s`
///
/// The rendering always parses back to the same value with default options.
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ticks == 0 {
            return f.write_str("0s");
        }
        if self.ticks < 0 {
            f.write_str("-")?;
        }

        let mut rem = self.ticks.unsigned_abs();
        let days = rem / TICKS_PER_DAY as u64;
        rem %= TICKS_PER_DAY as u64;
        let hours = rem / TICKS_PER_HOUR as u64;
        rem %= TICKS_PER_HOUR as u64;
        let minutes = rem / TICKS_PER_MINUTE as u64;
        rem %= TICKS_PER_MINUTE as u64;
        let seconds = rem / TICKS_PER_SECOND as u64;
        let fraction = rem % TICKS_PER_SECOND as u64;

        if days > 0 {
            write!(f, "{}d", days)?;
        }
        if hours > 0 {
            write!(f, "{}h", hours)?;
        }
        if minutes > 0 {
            write!(f, "{}m", minutes)?;
        }
        if fraction > 0 {
            let digits = format!("{:07}", fraction);
            write!(f, "{}.{}s", seconds, digits.trim_end_matches('0'))?;
        } else if seconds > 0 {
            write!(f, "{}s", seconds)?;
        }
        Ok(())
    }
}

impl FromStr for Duration {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse::parse(s)
    }
}
