//! Duration parsing
//!
//! Turns free-form text into signed durations. Clock notation (`1:30`,
//! `1.12:13`) and unit-suffixed notation (`5m`, `2d3h4m5s`, `10 seconds`)
//! can be mixed freely; surrounding prose is ignored.
//!
//! # Example
//!
//! ```
//! use lapse::models::Duration;
//! use lapse::parse::{parse, try_parse_many, ParseOptions};
//!
//! assert_eq!(parse("1h30m").unwrap(), Duration::from_minutes(90));
//! assert_eq!(parse("wait 1:30").unwrap(), Duration::from_minutes(90));
//!
//! // A coarser unit after a finer one starts a new duration
//! let durations = try_parse_many("5m 10h", &ParseOptions::default(), usize::MAX).unwrap();
//! assert_eq!(durations, vec![Duration::from_minutes(5), Duration::from_hours(10)]);
//! ```

pub mod decimal;
pub mod error;
pub mod merge;
pub mod options;
pub mod prefixed;
pub mod token;
pub mod tokenizer;
pub mod units;

pub use decimal::{Decimal, DecimalStyle};
pub use error::ParseError;
pub use options::ParseOptions;
pub use prefixed::{parse_prefixed, try_parse_prefixed};
pub use units::resolve_suffix;

use crate::models::Duration;
use merge::reduce;
use tokenizer::tokenize;

/// Parse a single duration with default options
pub fn parse(text: &str) -> Result<Duration, ParseError> {
    parse_with(text, &ParseOptions::default())
}

/// Parse a single duration.
///
/// Returns the first duration in the text. Tokens that cannot contribute
/// are skipped unless `fail_on_unitless_number` is set; either way, if
/// nothing usable was found the first such failure is returned.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Duration, ParseError> {
    let reduction = reduce(tokenize(text, options)?, options, usize::MAX);

    if let Some(failure) = reduction.failures.into_iter().next() {
        if options.fail_on_unitless_number || reduction.durations.is_empty() {
            return Err(failure);
        }
    }
    reduction
        .durations
        .into_iter()
        .next()
        .ok_or_else(|| ParseError::NoDuration { text: text.to_string() })
}

pub fn try_parse(text: &str, options: &ParseOptions) -> Option<Duration> {
    parse_with(text, options).ok()
}

/// Parse up to `max` durations in source order.
///
/// Text with no durations gives an empty list. Skipped tokens only make
/// this fail when `fail_on_unitless_number` is set.
pub fn parse_many(text: &str, options: &ParseOptions, max: usize) -> Result<Vec<Duration>, ParseError> {
    let reduction = reduce(tokenize(text, options)?, options, max);

    if options.fail_on_unitless_number {
        if let Some(failure) = reduction.failures.into_iter().next() {
            return Err(failure);
        }
    }
    Ok(reduction.durations)
}

pub fn try_parse_many(text: &str, options: &ParseOptions, max: usize) -> Option<Vec<Duration>> {
    parse_many(text, options, max).ok()
}
