//! Numeric tokenizer
//!
//! Finds every number-like run in the input, including colon-joined runs
//! such as `1:02:03.5`, and pairs each with the unit named in the text that
//! follows it (up to the next number).
//!
//! # Recognized shapes
//!
//! ```text
//! column  := sign? (digits (group ddd)* (dec digits*)? | dec digits+) exponent?
//! token   := column (':' column?)*
//!          | sign? ':' column ...        // leading empty column, ":30" / "-:30"
//! ```
//!
//! A sign only counts as a sign when it does not directly follow a letter
//! or digit, so `10-minute` and `1h-30m` do not produce negative numbers.

use log::{debug, trace};

use crate::models::Unit;
use crate::parse::decimal::{Decimal, DecimalStyle};
use crate::parse::error::ParseError;
use crate::parse::options::ParseOptions;
use crate::parse::token::{DayHourSplit, Token};
use crate::parse::units::resolve_suffix;

/// Map full-width forms to ASCII and underscores to spaces
pub fn normalize(text: &str) -> String {
    let normalized: String = text
        .chars()
        .map(|c| match c {
            '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
            '\u{3000}' => ' ',
            _ => c,
        })
        .map(|c| if c == '_' { ' ' } else { c })
        .collect();
    trace!("normalized {:?} -> {:?}", text, normalized);
    normalized
}

/// A scanned number: its token, or the reason its digits could not be read
pub type Scanned = Result<Token, ParseError>;

/// Split `text` into tokens in source order.
///
/// A number that is well formed but cannot be held (too large, too small,
/// huge exponent) becomes an `Err` entry so the caller can skip it. Only
/// `MalformedToken` aborts the whole scan.
pub fn tokenize(text: &str, options: &ParseOptions) -> Result<Vec<Scanned>, ParseError> {
    let normalized = normalize(text);
    let chars: Vec<char> = normalized.chars().collect();
    let scanner = Scanner { chars: &chars, style: &options.decimal_style };

    let spans = scanner.find_numbers();
    let mut tokens = Vec::with_capacity(spans.len());

    for (index, &(start, end)) in spans.iter().enumerate() {
        let suffix_end = spans.get(index + 1).map_or(chars.len(), |next| next.0);
        let number: String = chars[start..end].iter().collect();
        let suffix: String = chars[end..suffix_end].iter().collect();
        let given_unit = resolve_suffix(&suffix);

        let scanned = if number.contains(':') {
            build_coloned(number, given_unit, options)
        } else {
            Decimal::parse(&number, &options.decimal_style)
                .map(|value| Token::OneUnit { text: number, value: Some(value), given_unit })
        };
        if let Err(err @ ParseError::MalformedToken { .. }) = scanned {
            return Err(err);
        }
        match &scanned {
            Ok(token) => debug!("token {:?} (suffix {:?})", token, suffix.trim()),
            Err(err) => debug!("unreadable number: {}", err),
        }
        tokens.push(scanned);
    }

    Ok(tokens)
}

fn build_coloned(text: String, given_unit: Unit, options: &ParseOptions) -> Result<Token, ParseError> {
    let style = &options.decimal_style;
    let parts: Vec<&str> = text.split(':').collect();
    let first = parts[0];
    let sign_only = first.is_empty() || first == "-" || first == "+";
    let negative_coloned = first.starts_with('-');

    let mut columns = Vec::with_capacity(parts.len());
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() || (i == 0 && sign_only) {
            columns.push(None);
        } else {
            columns.push(Some(Decimal::parse(part, style)?));
        }
    }

    if sign_only && options.ignore_starting_colon {
        columns.remove(0);
    }

    let day_hour_split = if options.allow_dot_separated_day_hours && !sign_only {
        split_day_hours(first, style)?
    } else {
        None
    };

    Ok(Token::Coloned {
        text,
        columns,
        given_unit,
        starts_with_colon: sign_only,
        negative_coloned,
        day_hour_split,
    })
}

/// `1.12` -> 1 day, 12 hours. Both halves must be plain digits (the day
/// half may carry a sign).
fn split_day_hours(column: &str, style: &DecimalStyle) -> Result<Option<DayHourSplit>, ParseError> {
    let Some((days, hours)) = column.split_once(style.decimal_separator) else {
        return Ok(None);
    };
    let day_digits = days.trim_start_matches(['-', '+']);
    let plain = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !plain(day_digits) || !plain(hours) {
        return Ok(None);
    }
    Ok(Some(DayHourSplit {
        days: Decimal::parse(days, &DecimalStyle::INVARIANT)?,
        hours: Decimal::parse(hours, &DecimalStyle::INVARIANT)?,
    }))
}

struct Scanner<'a> {
    chars: &'a [char],
    style: &'a DecimalStyle,
}

impl<'a> Scanner<'a> {
    /// Non-overlapping `(start, end)` char ranges of every numeric run
    fn find_numbers(&self) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut i = 0;
        while i < self.chars.len() {
            if self.match_starts_at(i) {
                let end = self.scan_token(i);
                spans.push((i, end));
                i = end;
            } else {
                i += 1;
            }
        }
        spans
    }

    fn at(&self, i: usize) -> Option<char> {
        self.chars.get(i).copied()
    }

    fn digit_at(&self, i: usize) -> bool {
        self.at(i).map_or(false, |c| c.is_ascii_digit())
    }

    fn decimal_at(&self, i: usize) -> bool {
        self.at(i) == Some(self.style.decimal_separator)
    }

    /// `+`/`-` that is not glued to a preceding word or number
    fn sign_at(&self, i: usize) -> bool {
        matches!(self.at(i), Some('-') | Some('+'))
            && (i == 0 || self.at(i - 1).map_or(true, |prev| !prev.is_alphanumeric()))
    }

    fn column_starts_at(&self, i: usize) -> bool {
        if self.digit_at(i) {
            return true;
        }
        if self.decimal_at(i) {
            return self.digit_at(i + 1);
        }
        if matches!(self.at(i), Some('-') | Some('+')) {
            return self.digit_at(i + 1) || (self.decimal_at(i + 1) && self.digit_at(i + 2));
        }
        false
    }

    /// A `:` that leads to another column (possibly through more colons)
    fn colon_continues_at(&self, i: usize) -> bool {
        let mut j = i;
        while self.at(j) == Some(':') {
            if self.column_starts_at(j + 1) {
                return true;
            }
            j += 1;
        }
        false
    }

    fn match_starts_at(&self, i: usize) -> bool {
        if matches!(self.at(i), Some('-') | Some('+')) {
            return self.sign_at(i)
                && (self.column_starts_at(i) || self.colon_continues_at(i + 1));
        }
        self.column_starts_at(i) || self.colon_continues_at(i)
    }

    /// Scan one token starting at `start`; returns the end index
    fn scan_token(&self, start: usize) -> usize {
        let mut i = start;
        if matches!(self.at(i), Some('-') | Some('+')) && !self.column_starts_at(i) {
            // sign-only first column, "-:30"
            i += 1;
        } else if self.column_starts_at(i) {
            i = self.scan_column(i);
        }
        while self.colon_continues_at(i) {
            i += 1;
            if self.column_starts_at(i) {
                i = self.scan_column(i);
            }
        }
        i
    }

    fn scan_column(&self, start: usize) -> usize {
        let mut i = start;
        if matches!(self.at(i), Some('-') | Some('+')) {
            i += 1;
        }

        let mut saw_digit = false;
        let mut in_fraction = false;
        while let Some(c) = self.at(i) {
            if c.is_ascii_digit() {
                saw_digit = true;
                i += 1;
            } else if Some(c) == self.style.group_separator && saw_digit && !in_fraction && self.group_at(i + 1) {
                i += 1;
            } else if c == self.style.decimal_separator && !in_fraction && (saw_digit || self.digit_at(i + 1)) {
                in_fraction = true;
                i += 1;
            } else if (c == 'e' || c == 'E') && saw_digit {
                if let Some(end) = self.exponent_end(i + 1) {
                    i = end;
                }
                break;
            } else {
                break;
            }
        }
        i
    }

    /// Exactly three digits, not followed by a fourth
    fn group_at(&self, i: usize) -> bool {
        self.digit_at(i) && self.digit_at(i + 1) && self.digit_at(i + 2) && !self.digit_at(i + 3)
    }

    fn exponent_end(&self, start: usize) -> Option<usize> {
        let mut i = start;
        if matches!(self.at(i), Some('-') | Some('+')) {
            i += 1;
        }
        if !self.digit_at(i) {
            return None;
        }
        while self.digit_at(i) {
            i += 1;
        }
        Some(i)
    }
}
