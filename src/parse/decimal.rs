//! Exact decimal numbers and their conversion to ticks
//!
//! Numbers are kept as `mantissa / 10^scale` so that `0.1h` converts to
//! exactly 360 seconds and sub-tick remainders can be detected instead of
//! being lost to floating point.

use crate::models::Unit;
use crate::parse::error::ParseError;

/// Fractional digits kept before truncating
const MAX_SCALE: u32 = 28;

/// How numbers are written: decimal separator and optional digit grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalStyle {
    pub decimal_separator: char,
    /// Thousands separator; grouping is rejected when `None`
    pub group_separator: Option<char>,
}

impl DecimalStyle {
    /// `1234.5`, no grouping
    pub const INVARIANT: DecimalStyle = DecimalStyle {
        decimal_separator: '.',
        group_separator: None,
    };

    pub const fn new(decimal_separator: char, group_separator: Option<char>) -> Self {
        DecimalStyle { decimal_separator, group_separator }
    }
}

impl Default for DecimalStyle {
    fn default() -> Self {
        DecimalStyle::INVARIANT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decimal {
    mantissa: i128,
    scale: u32,
}

impl Decimal {
    pub const ZERO: Decimal = Decimal { mantissa: 0, scale: 0 };

    pub fn from_int(value: i128) -> Self {
        Decimal { mantissa: value, scale: 0 }
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa < 0
    }

    pub fn abs(&self) -> Decimal {
        Decimal { mantissa: self.mantissa.abs(), scale: self.scale }
    }

    pub fn neg(&self) -> Decimal {
        Decimal { mantissa: -self.mantissa, scale: self.scale }
    }

    /// Parse a number written in `style`.
    ///
    /// Accepts an optional leading sign, digits with optional grouping, one
    /// decimal separator and an optional `e`/`E` exponent. At least one
    /// digit is required.
    pub fn parse(text: &str, style: &DecimalStyle) -> Result<Decimal, ParseError> {
        let malformed = || ParseError::MalformedToken { text: text.to_string() };
        let chars: Vec<char> = text.chars().collect();
        let mut i = 0;

        let negative = match chars.first() {
            Some('-') => {
                i += 1;
                true
            }
            Some('+') => {
                i += 1;
                false
            }
            _ => false,
        };

        let mut mantissa: i128 = 0;
        let mut scale: u32 = 0;
        let mut digits = 0;
        let mut in_fraction = false;

        while i < chars.len() {
            let c = chars[i];
            if let Some(d) = c.to_digit(10) {
                digits += 1;
                if !in_fraction {
                    mantissa = mantissa
                        .checked_mul(10)
                        .and_then(|m| m.checked_add(i128::from(d)))
                        .ok_or_else(|| ParseError::overflow(text))?;
                } else if scale < MAX_SCALE {
                    if let Some(m) = mantissa.checked_mul(10).and_then(|m| m.checked_add(i128::from(d))) {
                        mantissa = m;
                        scale += 1;
                    }
                } else if d != 0 && mantissa == 0 {
                    return Err(ParseError::overflow(text));
                }
            } else if c == style.decimal_separator && !in_fraction {
                in_fraction = true;
            } else if Some(c) == style.group_separator && !in_fraction && digits > 0 {
                // grouping only between digits
            } else if c == 'e' || c == 'E' {
                break;
            } else {
                return Err(malformed());
            }
            i += 1;
        }

        if digits == 0 {
            return Err(malformed());
        }

        let mut value = Decimal { mantissa, scale };

        if i < chars.len() {
            let exponent_text: String = chars[i + 1..].iter().collect();
            let digits = exponent_text.strip_prefix(['-', '+']).unwrap_or(exponent_text.as_str());
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(malformed());
            }
            value = match exponent_text.parse::<i32>() {
                Ok(exponent) => value.with_exponent(exponent),
                // too many exponent digits for any representable value
                Err(_) if value.is_zero() => Some(Decimal::ZERO),
                Err(_) => None,
            }
            .ok_or_else(|| ParseError::overflow(text))?;
        }

        Ok(if negative { value.neg() } else { value })
    }

    /// Multiply by `10^exponent`. `None` if the result cannot be held, or a
    /// non-zero value would vanish.
    fn with_exponent(self, exponent: i32) -> Option<Decimal> {
        let Decimal { mut mantissa, mut scale } = self;
        if mantissa == 0 {
            return Some(Decimal::ZERO);
        }
        if exponent >= 0 {
            let mut up = exponent.unsigned_abs();
            let reduce = up.min(scale);
            scale -= reduce;
            up -= reduce;
            if up > 0 {
                mantissa = mantissa.checked_mul(10i128.checked_pow(up)?)?;
            }
        } else {
            let nonzero = mantissa != 0;
            let mut new_scale = u64::from(scale) + u64::from(exponent.unsigned_abs());
            while new_scale > u64::from(MAX_SCALE) && mantissa != 0 {
                mantissa /= 10;
                new_scale -= 1;
            }
            if nonzero && mantissa == 0 {
                return None;
            }
            scale = new_scale.min(u64::from(MAX_SCALE)) as u32;
        }
        Some(Decimal { mantissa, scale })
    }

    /// Convert to whole ticks of `unit`, truncating toward zero.
    ///
    /// A non-zero value that would truncate to zero ticks is an overflow,
    /// as is a result outside the tick range. Years and months only accept
    /// zero.
    pub fn to_ticks(&self, unit: Unit, text: &str) -> Result<i64, ParseError> {
        if self.is_zero() {
            return Ok(0);
        }
        let Some((numerator, denominator)) = unit.tick_ratio() else {
            if unit.is_ambiguous() {
                return Err(ParseError::AmbiguousUnit { text: text.to_string(), unit });
            }
            return Err(ParseError::UnitlessNumber { text: text.to_string() });
        };

        let scaled = self
            .mantissa
            .checked_mul(numerator)
            .ok_or_else(|| ParseError::overflow(text))?;
        let divisor = 10i128
            .checked_pow(self.scale)
            .and_then(|p| p.checked_mul(denominator))
            .ok_or_else(|| ParseError::overflow(text))?;
        let ticks = scaled / divisor;

        if ticks == 0 && self.mantissa != 0 {
            return Err(ParseError::overflow(text));
        }
        i64::try_from(ticks).map_err(|_| ParseError::overflow(text))
    }
}
