use lapse::models::{Duration, Unit};
use lapse::parse::{
    parse, parse_many, parse_with, try_parse, try_parse_many, DecimalStyle, ParseError, ParseOptions,
};

fn minutes_default() -> ParseOptions {
    ParseOptions::default().with_coloned_default(Unit::Minutes)
}

#[test]
fn test_unit_suffixed() {
    assert_eq!(parse("5s").unwrap(), Duration::from_seconds(5));
    assert_eq!(parse("1.5h").unwrap(), Duration::from_minutes(90));
    assert_eq!(parse("10 seconds").unwrap(), Duration::from_seconds(10));
    assert_eq!(parse("250ms").unwrap(), Duration::from_millis(250));
    assert_eq!(parse("3 weeks").unwrap(), Duration::from_weeks(3));
}

#[test]
fn test_concatenated_units_merge() {
    let expected = Duration::from_days(2)
        + Duration::from_hours(3)
        + Duration::from_minutes(4)
        + Duration::from_seconds(5);
    assert_eq!(parse("2d3h4m5s").unwrap(), expected);
    assert_eq!(parse("2 days, 3 hours, 4 minutes and 5 seconds").unwrap(), expected);
}

#[test]
fn test_clock_notation() {
    assert_eq!(
        parse_with("1:30", &minutes_default()).unwrap(),
        Duration::from_minutes(1) + Duration::from_seconds(30)
    );
    assert_eq!(parse("1:30").unwrap(), Duration::from_minutes(90));
    assert_eq!(parse(":30").unwrap(), Duration::from_minutes(30));
    assert_eq!(parse("1:30 min").unwrap(), Duration::from_seconds(90));
}

#[test]
fn test_day_hour_clock_notation() {
    let options = ParseOptions::default()
        .with_allow_dot_separated_day_hours(true)
        .with_coloned_default(Unit::Hours);
    let expected = Duration::from_days(1) + Duration::from_hours(12) + Duration::from_minutes(13);
    assert_eq!(parse_with("1.12:13", &options).unwrap(), expected);

    let options = options.with_allow_dot_separated_day_hours(false);
    assert_eq!(
        parse_with("1.5:30", &options).unwrap(),
        Duration::from_minutes(90) + Duration::from_minutes(30)
    );
}

#[test]
fn test_auto_units_for_extra_columns() {
    let expected = Duration::from_days(1)
        + Duration::from_hours(2)
        + Duration::from_minutes(3)
        + Duration::from_seconds(4);
    assert_eq!(parse("1:2:3:4").unwrap(), expected);

    let seconds = ParseOptions::default().with_coloned_default(Unit::Seconds);
    assert_eq!(parse_with("1:30", &seconds).unwrap(), Duration::from_seconds(90));

    let fixed = seconds.with_auto_units_if_too_many_colons(false);
    assert_eq!(
        parse_with("1:30", &fixed).unwrap(),
        Duration::from_seconds(1) + Duration::from_millis(30)
    );
}

#[test]
fn test_too_many_colons() {
    assert!(matches!(parse("1:2:3:4:5:6:7:8"), Err(ParseError::TooManyColons { .. })));
}

#[test]
fn test_negative_durations() {
    assert_eq!(parse("-5m").unwrap(), Duration::from_minutes(-5));
    assert_eq!(parse("-1h 30m").unwrap(), Duration::from_minutes(-90));
    assert_eq!(parse("-1:30").unwrap(), Duration::from_minutes(-90));
    assert_eq!(parse("-0:05:10").unwrap(), -(Duration::from_minutes(5) + Duration::from_seconds(10)));
    assert_eq!(parse("-1:-30").unwrap(), Duration::from_minutes(-90));
    assert_eq!(parse("1:-30").unwrap(), Duration::from_minutes(30));
}

#[test]
fn test_dash_between_words_is_not_a_sign() {
    assert_eq!(parse("1h-30m").unwrap(), Duration::from_minutes(90));
    assert_eq!(parse("a 10-minute break").unwrap(), Duration::from_minutes(10));
}

#[test]
fn test_coarser_unit_splits_instead_of_failing() {
    let options = ParseOptions::default();
    assert_eq!(
        try_parse_many("5m 10h", &options, usize::MAX),
        Some(vec![Duration::from_minutes(5), Duration::from_hours(10)])
    );

    let relaxed = options.with_strict_big_to_small(false);
    assert_eq!(
        try_parse_many("5m 10h", &relaxed, usize::MAX),
        Some(vec![Duration::from_hours(10) + Duration::from_minutes(5)])
    );
}

#[test]
fn test_many_respects_max() {
    let options = ParseOptions::default();
    assert_eq!(
        parse_many("1h 2d 3w", &options, 2).unwrap(),
        vec![Duration::from_hours(1), Duration::from_days(2)]
    );
    assert_eq!(parse_many("1h 2d 3w", &options, 0).unwrap(), vec![]);
}

#[test]
fn test_below_tick_resolution_overflows() {
    assert!(matches!(parse("0.05 nanoseconds"), Err(ParseError::Overflow { .. })));
    assert_eq!(parse("100ns").unwrap(), Duration::from_ticks(1));
    assert_eq!(parse("150ns").unwrap(), Duration::from_ticks(1));
}

#[test]
fn test_years_and_months_only_when_zero() {
    assert!(matches!(
        parse("1 year"),
        Err(ParseError::AmbiguousUnit { unit: Unit::Years, .. })
    ));
    assert!(matches!(
        parse("2 months"),
        Err(ParseError::AmbiguousUnit { unit: Unit::Months, .. })
    ));
    assert_eq!(parse("0 years").unwrap(), Duration::ZERO);
}

#[test]
fn test_unitless_numbers() {
    assert!(matches!(parse("5"), Err(ParseError::UnitlessNumber { .. })));
    assert_eq!(parse("0").unwrap(), Duration::ZERO);

    let no_zero = ParseOptions::default().with_allow_unitless_zero(false);
    assert!(matches!(parse_with("0", &no_zero), Err(ParseError::UnitlessNumber { .. })));

    let seconds = ParseOptions::default().with_uncoloned_default(Unit::Seconds);
    assert_eq!(parse_with("90", &seconds).unwrap(), Duration::from_seconds(90));
}

#[test]
fn test_lenient_and_strict_unitless_handling() {
    let lenient = ParseOptions::default();
    assert_eq!(parse_with("take 5 for 10s", &lenient).unwrap(), Duration::from_seconds(10));
    assert_eq!(
        parse_many("1h 5 30m", &lenient, usize::MAX).unwrap(),
        vec![Duration::from_hours(1), Duration::from_minutes(30)]
    );

    let strict = lenient.with_fail_on_unitless_number(true);
    assert!(matches!(parse_with("take 5 for 10s", &strict), Err(ParseError::UnitlessNumber { .. })));
    assert!(matches!(parse_many("1h 5 30m", &strict, usize::MAX), Err(ParseError::UnitlessNumber { .. })));
}

#[test]
fn test_unreadable_numbers_are_skipped_like_other_failures() {
    let lenient = ParseOptions::default();
    let oversized = format!("5m {}s", "9".repeat(42));
    for text in ["5m 1e-40s", "5m 0.05ns", oversized.as_str(), "5m 1e99999999999s"] {
        assert_eq!(try_parse_many(text, &lenient, usize::MAX), Some(vec![Duration::from_minutes(5)]), "{}", text);
        assert_eq!(parse(text).unwrap(), Duration::from_minutes(5), "{}", text);
    }
    assert!(matches!(parse("1e-40s"), Err(ParseError::Overflow { .. })));

    let strict = lenient.with_fail_on_unitless_number(true);
    assert!(matches!(parse_many("5m 1e-40s", &strict, usize::MAX), Err(ParseError::Overflow { .. })));
}

#[test]
fn test_zero_with_any_exponent() {
    assert_eq!(parse("0e50s").unwrap(), Duration::ZERO);
    assert_eq!(parse("0e99999999999s").unwrap(), Duration::ZERO);
}

#[test]
fn test_words_starting_like_units_are_not_units() {
    assert!(matches!(parse("3 dogs"), Err(ParseError::UnitlessNumber { .. })));
    assert!(matches!(parse("5 more minutes"), Err(ParseError::UnitlessNumber { .. })));
    assert_eq!(parse("5 more minutes, or 10 minutes").unwrap(), Duration::from_minutes(10));
}

#[test]
fn test_ambiguous_error_names_the_offending_unit() {
    assert!(matches!(
        parse("0:1 years"),
        Err(ParseError::AmbiguousUnit { unit: Unit::Months, .. })
    ));
    assert!(matches!(
        parse("2:0 years"),
        Err(ParseError::AmbiguousUnit { unit: Unit::Years, .. })
    ));
}

#[test]
fn test_no_duration() {
    assert_eq!(parse(""), Err(ParseError::NoDuration { text: String::new() }));
    assert_eq!(try_parse("call me later", &ParseOptions::default()), None);
    assert_eq!(parse_many("call me later", &ParseOptions::default(), usize::MAX).unwrap(), vec![]);
}

#[test]
fn test_decimal_styles() {
    let comma = ParseOptions::default().with_decimal_style(DecimalStyle::new(',', Some('.')));
    assert_eq!(parse_with("1,5h", &comma).unwrap(), Duration::from_minutes(90));
    assert_eq!(parse_with("1.500ms", &comma).unwrap(), Duration::from_millis(1500));

    let grouped = ParseOptions::default().with_decimal_style(DecimalStyle::new('.', Some(',')));
    assert_eq!(parse_with("1,500ms", &grouped).unwrap(), Duration::from_millis(1500));
}

#[test]
fn test_full_width_and_underscores() {
    assert_eq!(parse("５ｍ").unwrap(), Duration::from_minutes(5));
    assert_eq!(parse("１：３０").unwrap(), Duration::from_minutes(90));
    assert_eq!(parse("10_minutes").unwrap(), Duration::from_minutes(10));
}

#[test]
fn test_canonical_rendering_parses_back() {
    let inputs = [
        "5s", "1.5h", "2d3h4m5s", "-5m", "1:30", "1.12:13", "-1:30", "0.5ms", "3w", "1e3ms", ":30",
        "-0:05:10", "0s", "100ns", "1h 0.25s",
    ];
    for input in inputs {
        let duration = parse(input).unwrap();
        let rendered = duration.to_string();
        assert_eq!(parse(&rendered).unwrap(), duration, "{} rendered as {}", input, rendered);
    }
}

#[test]
fn test_single_and_many_agree() {
    let inputs = ["5s", "call me later", "1h30m", "wait 10 minutes", "1:30", "", "-2d"];
    for options in [ParseOptions::default(), minutes_default().with_uncoloned_default(Unit::Seconds)] {
        for input in inputs {
            let single = try_parse(input, &options).is_some();
            let many = !try_parse_many(input, &options, 1).unwrap_or_default().is_empty();
            assert_eq!(single, many, "{:?}", input);
        }
    }
}

#[test]
fn test_from_str_and_display() {
    let duration: Duration = "1h 30m".parse().unwrap();
    assert_eq!(duration.to_string(), "1h30m");
    assert!("soon".parse::<Duration>().is_err());
}

#[test]
fn test_conversions() {
    let duration = Duration::from_millis(1500);
    assert_eq!(chrono::Duration::from(duration), chrono::Duration::milliseconds(1500));
    assert_eq!(duration.to_std(), Some(std::time::Duration::from_millis(1500)));
    assert_eq!(Duration::from_seconds(-1).to_std(), None);
    assert_eq!(serde_json::to_string(&Duration::from_seconds(1)).unwrap(), "10000000");
    let back: Duration = serde_json::from_str("10000000").unwrap();
    assert_eq!(back, Duration::from_seconds(1));
}
