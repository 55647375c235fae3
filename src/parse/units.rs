//! Unit spellings and suffix resolution
//!
//! The table is built once on first use and shared read-only afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::models::Unit;

/// Every accepted spelling, lowercase
const UNIT_SPELLINGS: &[(&str, Unit)] = &[
    ("y", Unit::Years),
    ("yr", Unit::Years),
    ("yrs", Unit::Years),
    ("year", Unit::Years),
    ("years", Unit::Years),
    ("mo", Unit::Months),
    ("mon", Unit::Months),
    ("mos", Unit::Months),
    ("mth", Unit::Months),
    ("mths", Unit::Months),
    ("month", Unit::Months),
    ("months", Unit::Months),
    ("w", Unit::Weeks),
    ("wk", Unit::Weeks),
    ("wks", Unit::Weeks),
    ("week", Unit::Weeks),
    ("weeks", Unit::Weeks),
    ("d", Unit::Days),
    ("day", Unit::Days),
    ("days", Unit::Days),
    ("h", Unit::Hours),
    ("hr", Unit::Hours),
    ("hrs", Unit::Hours),
    ("hour", Unit::Hours),
    ("hours", Unit::Hours),
    ("m", Unit::Minutes),
    ("min", Unit::Minutes),
    ("mins", Unit::Minutes),
    ("minute", Unit::Minutes),
    ("minutes", Unit::Minutes),
    ("s", Unit::Seconds),
    ("sec", Unit::Seconds),
    ("secs", Unit::Seconds),
    ("second", Unit::Seconds),
    ("seconds", Unit::Seconds),
    ("ms", Unit::Milliseconds),
    ("msec", Unit::Milliseconds),
    ("msecs", Unit::Milliseconds),
    ("milli", Unit::Milliseconds),
    ("millis", Unit::Milliseconds),
    ("millisecond", Unit::Milliseconds),
    ("milliseconds", Unit::Milliseconds),
    ("us", Unit::Microseconds),
    ("µs", Unit::Microseconds),
    ("μs", Unit::Microseconds),
    ("usec", Unit::Microseconds),
    ("usecs", Unit::Microseconds),
    ("micro", Unit::Microseconds),
    ("micros", Unit::Microseconds),
    ("microsecond", Unit::Microseconds),
    ("microseconds", Unit::Microseconds),
    ("ns", Unit::Nanoseconds),
    ("nsec", Unit::Nanoseconds),
    ("nsecs", Unit::Nanoseconds),
    ("nano", Unit::Nanoseconds),
    ("nanos", Unit::Nanoseconds),
    ("nanosecond", Unit::Nanoseconds),
    ("nanoseconds", Unit::Nanoseconds),
    ("ps", Unit::Picoseconds),
    ("psec", Unit::Picoseconds),
    ("psecs", Unit::Picoseconds),
    ("pico", Unit::Picoseconds),
    ("picos", Unit::Picoseconds),
    ("picosecond", Unit::Picoseconds),
    ("picoseconds", Unit::Picoseconds),
];

struct UnitTable {
    by_spelling: HashMap<&'static str, Unit>,
    /// Longest spelling, in chars
    longest: usize,
}

fn unit_table() -> &'static UnitTable {
    static UNIT_TABLE: OnceLock<UnitTable> = OnceLock::new();
    UNIT_TABLE.get_or_init(|| {
        let by_spelling: HashMap<&'static str, Unit> = UNIT_SPELLINGS.iter().copied().collect();
        let longest = UNIT_SPELLINGS
            .iter()
            .map(|(spelling, _)| spelling.chars().count())
            .max()
            .unwrap_or(0);
        UnitTable { by_spelling, longest }
    })
}

/// Exact (case-insensitive) lookup of a unit spelling
pub fn lookup_unit(spelling: &str) -> Option<Unit> {
    let lower = spelling.to_lowercase();
    unit_table().by_spelling.get(lower.as_str()).copied()
}

/// Resolve the unit named at the start of the text following a number.
///
/// Leading non-letters are skipped (`" hours,"` resolves to hours) and the
/// following run of letters must be a whole spelling, so `"3 dogs"` has no
/// unit. A run glued to the number (`"5mx"`) falls back to the longest
/// spelling that prefixes it. Returns `Unit::None` when nothing matches.
pub fn resolve_suffix(text: &str) -> Unit {
    let table = unit_table();
    let glued = text.chars().next().map_or(false, char::is_alphabetic);
    let letters: Vec<char> = text
        .chars()
        .skip_while(|c| !c.is_alphabetic())
        .take_while(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();

    if letters.len() <= table.longest {
        let word: String = letters.iter().collect();
        if let Some(unit) = table.by_spelling.get(word.as_str()) {
            return *unit;
        }
    }
    if !glued {
        return Unit::None;
    }

    for len in (1..=letters.len().min(table.longest)).rev() {
        let candidate: String = letters[..len].iter().collect();
        if let Some(unit) = table.by_spelling.get(candidate.as_str()) {
            return *unit;
        }
    }
    Unit::None
}
