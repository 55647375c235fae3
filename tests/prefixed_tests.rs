use std::collections::BTreeMap;

use lapse::models::Duration;
use lapse::parse::{parse_prefixed, try_parse_prefixed, ParseError, ParseOptions};

fn route(text: &str, prefixes: &[&str], keywords: &[&str]) -> BTreeMap<String, Option<Duration>> {
    parse_prefixed(text, prefixes, keywords, &ParseOptions::default()).unwrap()
}

#[test]
fn test_prefixes_and_keywords() {
    let map = route("wait 5m then retry for 1:30 now", &["wait", "for"], &["now"]);

    let mut expected = BTreeMap::new();
    expected.insert("wait".to_string(), Some(Duration::from_minutes(5)));
    expected.insert("for".to_string(), Some(Duration::from_minutes(90)));
    expected.insert("now".to_string(), None);
    assert_eq!(map, expected);
}

#[test]
fn test_leading_duration_is_positional() {
    let map = route("10s wait 2h", &["wait"], &[]);
    assert_eq!(map.get("0"), Some(&Some(Duration::from_seconds(10))));
    assert_eq!(map.get("wait"), Some(&Some(Duration::from_hours(2))));
}

#[test]
fn test_extra_durations_in_a_span_are_positional() {
    let map = route("wait 5m 10h", &["wait"], &[]);
    assert_eq!(map.get("wait"), Some(&Some(Duration::from_minutes(5))));
    assert_eq!(map.get("0"), Some(&Some(Duration::from_hours(10))));
}

#[test]
fn test_duplicate_prefix_keeps_first_value() {
    let map = route("wait 5m wait 10m", &["wait"], &[]);
    assert_eq!(map.get("wait"), Some(&Some(Duration::from_minutes(5))));
    assert_eq!(map.get("0"), Some(&Some(Duration::from_minutes(10))));
}

#[test]
fn test_prefix_without_duration() {
    let map = route("wait forever", &["wait"], &[]);
    assert_eq!(map.get("wait"), Some(&None));
    assert_eq!(map.len(), 1);
}

#[test]
fn test_nearest_prefix_claims_the_duration() {
    let map = route("wait for 5m", &["wait", "for"], &[]);
    assert_eq!(map.get("for"), Some(&Some(Duration::from_minutes(5))));
    assert_eq!(map.get("wait"), Some(&None));

    let map = route("wait for 5m 10h", &["wait", "for"], &[]);
    assert_eq!(map.get("for"), Some(&Some(Duration::from_minutes(5))));
    assert_eq!(map.get("0"), Some(&Some(Duration::from_hours(10))));
    assert_eq!(map.get("wait"), Some(&None));
}

#[test]
fn test_unreadable_number_does_not_abort_routing() {
    let map = route("wait 1e-40s then 5m", &["wait"], &[]);
    assert_eq!(map.get("wait"), Some(&Some(Duration::from_minutes(5))));
}

#[test]
fn test_longest_word_wins() {
    let map = route("timeout 30s", &["time", "timeout"], &[]);
    assert_eq!(map.get("timeout"), Some(&Some(Duration::from_seconds(30))));
    assert_eq!(map.get("time"), None);
}

#[test]
fn test_colon_prefix() {
    let map = route(":45 then wait 1m", &[":", "wait"], &[]);
    assert_eq!(map.get(":"), Some(&Some(Duration::from_minutes(45))));
    assert_eq!(map.get("wait"), Some(&Some(Duration::from_minutes(1))));
    assert_eq!(map.get("0"), None);
}

#[test]
fn test_no_words_registered() {
    let map = route("5m and 3h", &[], &[]);
    assert_eq!(map.get("0"), Some(&Some(Duration::from_minutes(5))));
    assert_eq!(map.get("1"), Some(&Some(Duration::from_hours(3))));
}

#[test]
fn test_failures() {
    let strict = ParseOptions::default().with_fail_on_unitless_number(true);
    assert!(matches!(
        parse_prefixed("wait 5", &["wait"], &[], &strict),
        Err(ParseError::UnitlessNumber { .. })
    ));
    assert_eq!(try_parse_prefixed("wait 5", &["wait"], &[], &strict), None);

    let lenient = try_parse_prefixed("wait 5", &["wait"], &[], &ParseOptions::default()).unwrap();
    assert_eq!(lenient.get("wait"), Some(&None));
}
