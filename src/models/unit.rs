use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::duration::{
    TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MICROSECOND, TICKS_PER_MILLISECOND,
    TICKS_PER_MINUTE, TICKS_PER_SECOND, TICKS_PER_WEEK,
};

/// Time unit attached to a number
///
/// Variants are ordered coarse-to-fine. Ordering comparisons between units
/// are used directly by the merge engine, so the declaration order matters:
/// `Hours < Minutes` means "hours are coarser than minutes".
///
/// `None`, `Error`, `ErrorAmbiguous` and `ErrorTooManyUnits` are not time
/// units; `ZeroOnly` marks a quantity that is exactly zero and needs no unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    None,
    Error,
    ErrorAmbiguous,
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
    Picoseconds,
    ErrorTooManyUnits,
    ZeroOnly,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::None => "none",
            Unit::Error => "error",
            Unit::ErrorAmbiguous => "ambiguous",
            Unit::Years => "years",
            Unit::Months => "months",
            Unit::Weeks => "weeks",
            Unit::Days => "days",
            Unit::Hours => "hours",
            Unit::Minutes => "minutes",
            Unit::Seconds => "seconds",
            Unit::Milliseconds => "milliseconds",
            Unit::Microseconds => "microseconds",
            Unit::Nanoseconds => "nanoseconds",
            Unit::Picoseconds => "picoseconds",
            Unit::ErrorTooManyUnits => "too-many-units",
            Unit::ZeroOnly => "zero-only",
        }
    }

    /// Years through picoseconds
    pub fn is_time_unit(&self) -> bool {
        *self >= Unit::Years && *self <= Unit::Picoseconds
    }

    /// Years and months have no fixed length and only accept zero
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Unit::Years | Unit::Months)
    }

    /// The next finer unit. Stepping past picoseconds yields
    /// `ErrorTooManyUnits`; non-time units are returned unchanged.
    pub fn finer(&self) -> Unit {
        match self {
            Unit::Years => Unit::Months,
            Unit::Months => Unit::Weeks,
            Unit::Weeks => Unit::Days,
            Unit::Days => Unit::Hours,
            Unit::Hours => Unit::Minutes,
            Unit::Minutes => Unit::Seconds,
            Unit::Seconds => Unit::Milliseconds,
            Unit::Milliseconds => Unit::Microseconds,
            Unit::Microseconds => Unit::Nanoseconds,
            Unit::Nanoseconds => Unit::Picoseconds,
            Unit::Picoseconds => Unit::ErrorTooManyUnits,
            other => *other,
        }
    }

    /// Step `n` units finer
    pub fn step(&self, n: usize) -> Unit {
        let mut unit = *self;
        for _ in 0..n {
            if !unit.is_time_unit() {
                break;
            }
            unit = unit.finer();
        }
        unit
    }

    /// Length of one unit as a `(numerator, denominator)` count of ticks.
    ///
    /// Units finer than a tick have a denominator above one. Returns `None`
    /// for units without a fixed length.
    pub fn tick_ratio(&self) -> Option<(i128, i128)> {
        let ratio = match self {
            Unit::Weeks => (TICKS_PER_WEEK, 1),
            Unit::Days => (TICKS_PER_DAY, 1),
            Unit::Hours => (TICKS_PER_HOUR, 1),
            Unit::Minutes => (TICKS_PER_MINUTE, 1),
            Unit::Seconds => (TICKS_PER_SECOND, 1),
            Unit::Milliseconds => (TICKS_PER_MILLISECOND, 1),
            Unit::Microseconds => (TICKS_PER_MICROSECOND, 1),
            Unit::Nanoseconds => (1, 100),
            Unit::Picoseconds => (1, 100_000),
            _ => return None,
        };
        Some((i128::from(ratio.0), ratio.1))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = String;

    /// Accepts `none` or any spelling from the unit table (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower == "none" {
            return Ok(Unit::None);
        }
        crate::parse::units::lookup_unit(&lower)
            .ok_or_else(|| format!("Unknown unit '{}'", s))
    }
}
