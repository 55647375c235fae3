use crate::models::Unit;
use crate::parse::decimal::DecimalStyle;

/// Parser configuration
///
/// Built once and passed by reference; nothing in the parser mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Unit for a plain number with no suffix and no colon
    pub uncoloned_default: Unit,
    /// Unit for the first column of a colon-separated number
    pub coloned_default: Unit,
    /// Unitless numbers are hard errors instead of being skipped
    pub fail_on_unitless_number: bool,
    /// A bare `0` (or all-zero colon sequence) needs no unit
    pub allow_unitless_zero: bool,
    /// A later unit may not be coarser than the finest unit already merged
    pub strict_big_to_small: bool,
    /// Widen the first column's unit when there are more columns than it allows
    pub auto_units_if_too_many_colons: bool,
    /// `1.12:13` reads as days.hours:minutes
    pub allow_dot_separated_day_hours: bool,
    /// `:30` drops its empty leading column instead of treating it as zero
    pub ignore_starting_colon: bool,
    pub decimal_style: DecimalStyle,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            uncoloned_default: Unit::None,
            coloned_default: Unit::Hours,
            fail_on_unitless_number: false,
            allow_unitless_zero: true,
            strict_big_to_small: true,
            auto_units_if_too_many_colons: true,
            allow_dot_separated_day_hours: true,
            ignore_starting_colon: false,
            decimal_style: DecimalStyle::INVARIANT,
        }
    }
}

impl ParseOptions {
    pub fn with_uncoloned_default(mut self, unit: Unit) -> Self {
        self.uncoloned_default = unit;
        self
    }

    pub fn with_coloned_default(mut self, unit: Unit) -> Self {
        self.coloned_default = unit;
        self
    }

    pub fn with_fail_on_unitless_number(mut self, value: bool) -> Self {
        self.fail_on_unitless_number = value;
        self
    }

    pub fn with_allow_unitless_zero(mut self, value: bool) -> Self {
        self.allow_unitless_zero = value;
        self
    }

    pub fn with_strict_big_to_small(mut self, value: bool) -> Self {
        self.strict_big_to_small = value;
        self
    }

    pub fn with_auto_units_if_too_many_colons(mut self, value: bool) -> Self {
        self.auto_units_if_too_many_colons = value;
        self
    }

    pub fn with_allow_dot_separated_day_hours(mut self, value: bool) -> Self {
        self.allow_dot_separated_day_hours = value;
        self
    }

    pub fn with_ignore_starting_colon(mut self, value: bool) -> Self {
        self.ignore_starting_colon = value;
        self
    }

    pub fn with_decimal_style(mut self, style: DecimalStyle) -> Self {
        self.decimal_style = style;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParseOptions::default();
        assert_eq!(options.uncoloned_default, Unit::None);
        assert_eq!(options.coloned_default, Unit::Hours);
        assert!(!options.fail_on_unitless_number);
        assert!(options.strict_big_to_small);
        assert_eq!(options.decimal_style, DecimalStyle::INVARIANT);
    }

    #[test]
    fn test_builders_leave_other_fields_alone() {
        let options = ParseOptions::default()
            .with_coloned_default(Unit::Minutes)
            .with_strict_big_to_small(false);
        assert_eq!(options.coloned_default, Unit::Minutes);
        assert!(!options.strict_big_to_small);
        assert_eq!(options.uncoloned_default, Unit::None);
        assert!(options.allow_unitless_zero);
    }
}
