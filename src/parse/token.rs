//! Tokens produced by the scanner and consumed by the merge engine
//!
//! A token is one of three shapes:
//!
//! - `Coloned`: clock-style `1:30`, `-0:05:10`, `:30`, `1.12:13`
//! - `OneUnit`: a single number with an optional unit, `5`, `1.5h`, `10 sec`
//! - `Merged`: the running total the merge engine builds from the others
//!
//! All queries are answered from the token's own fields plus the shared
//! `ParseOptions`; tokens are never mutated.

use crate::models::{Duration, Unit};
use crate::parse::decimal::Decimal;
use crate::parse::error::ParseError;
use crate::parse::options::ParseOptions;

/// First column of a coloned token written as `days.hours`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayHourSplit {
    pub days: Decimal,
    pub hours: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Coloned {
        text: String,
        /// `None` for an empty column (`1::30`, `:30`)
        columns: Vec<Option<Decimal>>,
        given_unit: Unit,
        starts_with_colon: bool,
        /// The leading column carried a minus sign, even if it was `-0` or empty
        negative_coloned: bool,
        /// Set when the first column contains a decimal separator and
        /// day.hours reading is enabled; only used when the resolved unit
        /// allows it
        day_hour_split: Option<DayHourSplit>,
    },
    OneUnit {
        text: String,
        value: Option<Decimal>,
        given_unit: Unit,
    },
    Merged {
        duration: Duration,
        smallest_unit: Unit,
        initial_negative: bool,
    },
}

impl Token {
    /// Source text of the token, empty for merged totals
    pub fn text(&self) -> &str {
        match self {
            Token::Coloned { text, .. } | Token::OneUnit { text, .. } => text,
            Token::Merged { .. } => "",
        }
    }

    /// No number was captured at all
    pub fn is_null(&self) -> bool {
        match self {
            Token::Coloned { columns, day_hour_split, .. } => {
                day_hour_split.is_none() && columns.iter().all(Option::is_none)
            }
            Token::OneUnit { value, .. } => value.is_none(),
            Token::Merged { .. } => false,
        }
    }

    /// Every captured number is exactly zero; empty columns are ignored
    pub fn is_zero(&self) -> bool {
        match self {
            Token::Coloned { columns, day_hour_split, .. } => {
                let split_zero = day_hour_split
                    .map_or(true, |split| split.days.is_zero() && split.hours.is_zero());
                split_zero && columns.iter().flatten().all(Decimal::is_zero)
            }
            Token::OneUnit { value, .. } => value.map_or(true, |v| v.is_zero()),
            Token::Merged { duration, .. } => duration.is_zero(),
        }
    }

    /// Taken alone, the token is a negative quantity
    pub fn is_initial_negative(&self) -> bool {
        match self {
            Token::Coloned { negative_coloned, .. } => *negative_coloned,
            Token::OneUnit { value, .. } => value.map_or(false, |v| v.is_negative()),
            Token::Merged { initial_negative, .. } => *initial_negative,
        }
    }

    /// Unit of the token's first (or only) number
    pub fn best_guess_unit(&self, options: &ParseOptions) -> Unit {
        match self {
            Token::Coloned { .. } => self.coloned_layout(options).0,
            Token::OneUnit { given_unit, .. } => {
                if given_unit.is_time_unit() {
                    *given_unit
                } else {
                    self.default_unit(options.uncoloned_default, options)
                }
            }
            Token::Merged { smallest_unit, .. } => *smallest_unit,
        }
    }

    /// Unit of the token's last number; `ZeroOnly` if the token is all zero
    pub fn smallest_unit(&self, options: &ParseOptions) -> Unit {
        match self {
            Token::Merged { smallest_unit, .. } => *smallest_unit,
            _ if self.is_zero() => Unit::ZeroOnly,
            Token::Coloned { .. } => {
                let (unit, columns) = self.coloned_layout(options);
                if unit.is_time_unit() {
                    unit.step(columns.len().saturating_sub(1))
                } else {
                    unit
                }
            }
            Token::OneUnit { .. } => self.best_guess_unit(options),
        }
    }

    /// No usable unit, or a non-zero amount of years or months
    pub fn is_unitless_failure(&self, options: &ParseOptions) -> bool {
        let unit = self.best_guess_unit(options);
        (!unit.is_time_unit() && unit != Unit::ZeroOnly) || self.ambiguous_unit(options).is_some()
    }

    /// The columns run past the finest unit
    pub fn is_other_failure(&self, options: &ParseOptions) -> bool {
        let unit = self.smallest_unit(options);
        !unit.is_time_unit() && unit != Unit::ZeroOnly
    }

    /// The error this token stands for, if it cannot contribute a duration
    pub fn failure(&self, options: &ParseOptions) -> Option<ParseError> {
        let text = self.text().to_string();
        if self.is_unitless_failure(options) {
            if let Some(unit) = self.ambiguous_unit(options) {
                return Some(ParseError::AmbiguousUnit { text, unit });
            }
            return Some(ParseError::UnitlessNumber { text });
        }
        if self.is_other_failure(options) {
            return Some(ParseError::TooManyColons { text });
        }
        None
    }

    /// Convert to a signed duration.
    ///
    /// Coloned columns are read one unit finer each, starting at
    /// `best_guess_unit`. A negative coloned token negates every column.
    pub fn to_duration(&self, options: &ParseOptions) -> Result<Duration, ParseError> {
        match self {
            Token::Merged { duration, .. } => Ok(*duration),
            Token::OneUnit { text, value, .. } => {
                let Some(value) = value else {
                    return Ok(Duration::ZERO);
                };
                let unit = self.best_guess_unit(options);
                if unit == Unit::ZeroOnly {
                    return Ok(Duration::ZERO);
                }
                Ok(Duration::from_ticks(value.to_ticks(unit, text)?))
            }
            Token::Coloned { text, negative_coloned, .. } => {
                let (unit, columns) = self.coloned_layout(options);
                if unit == Unit::ZeroOnly {
                    return Ok(Duration::ZERO);
                }

                let mut total = Duration::ZERO;
                for (i, column) in columns.iter().enumerate() {
                    let Some(value) = column else {
                        continue;
                    };
                    let column_unit = unit.step(i);
                    if !column_unit.is_time_unit() && !value.is_zero() {
                        return Err(ParseError::TooManyColons { text: text.clone() });
                    }
                    let value = if *negative_coloned { value.abs().neg() } else { *value };
                    let ticks = value.to_ticks(column_unit, text)?;
                    total = total
                        .checked_add(Duration::from_ticks(ticks))
                        .ok_or_else(|| ParseError::overflow(text))?;
                }
                Ok(total)
            }
        }
    }

    /// `default` if it is a real unit, otherwise `ZeroOnly` for permitted
    /// unitless zeros
    fn default_unit(&self, default: Unit, options: &ParseOptions) -> Unit {
        if default.is_time_unit() {
            default
        } else if options.allow_unitless_zero && self.is_zero() {
            Unit::ZeroOnly
        } else {
            default
        }
    }

    /// Resolved unit of the first column and the columns it applies to,
    /// with any day.hours split applied
    fn coloned_layout(&self, options: &ParseOptions) -> (Unit, Vec<Option<Decimal>>) {
        let Token::Coloned { columns, given_unit, day_hour_split, .. } = self else {
            return (self.best_guess_unit(options), Vec::new());
        };

        let count = columns.len();
        let mut unit = if given_unit.is_time_unit() {
            *given_unit
        } else {
            let unit = self.default_unit(options.coloned_default, options);
            if options.auto_units_if_too_many_colons {
                auto_unit(unit, count)
            } else {
                unit
            }
        };

        let Some(split) = day_hour_split else {
            return (unit, columns.clone());
        };
        let splits = unit == Unit::Days
            || (matches!(unit, Unit::Hours | Unit::None) && (2..=3).contains(&count));
        if !splits {
            return (unit, columns.clone());
        }

        unit = Unit::Days;
        let mut split_columns = Vec::with_capacity(count + 1);
        split_columns.push(Some(split.days));
        split_columns.push(Some(split.hours));
        split_columns.extend(columns.iter().skip(1).copied());
        (unit, split_columns)
    }

    /// Unit of the first column measured in years or months that holds a
    /// non-zero amount
    fn ambiguous_unit(&self, options: &ParseOptions) -> Option<Unit> {
        match self {
            Token::Coloned { .. } => {
                let (unit, columns) = self.coloned_layout(options);
                if !unit.is_time_unit() {
                    return None;
                }
                columns
                    .iter()
                    .enumerate()
                    .map(|(i, column)| (unit.step(i), column))
                    .find(|(column_unit, column)| {
                        column_unit.is_ambiguous() && column.map_or(false, |v| !v.is_zero())
                    })
                    .map(|(column_unit, _)| column_unit)
            }
            Token::OneUnit { .. } => {
                let unit = self.best_guess_unit(options);
                (unit.is_ambiguous() && !self.is_zero()).then_some(unit)
            }
            Token::Merged { .. } => None,
        }
    }
}

/// Widen a defaulted first-column unit when there are more columns than it
/// leaves room for: `1:2:3:4` is d:h:m:s, `1:2:3` with a minutes or
/// seconds default is h:m:s, `1:2` with a seconds default is m:s.
fn auto_unit(unit: Unit, columns: usize) -> Unit {
    if !unit.is_time_unit() {
        return unit;
    }
    match columns {
        4 => Unit::Days,
        3 if matches!(unit, Unit::Minutes | Unit::Seconds) => Unit::Hours,
        2 if unit == Unit::Seconds => Unit::Minutes,
        _ => unit,
    }
}
