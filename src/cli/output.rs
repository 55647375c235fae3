// Output formatting for the lapse command line

use std::collections::BTreeMap;

use chrono::{DateTime, Local, TimeZone};
use serde_json::{json, Value};

use crate::models::Duration;

/// `1h30m (5400s)`
pub fn format_duration_line(duration: &Duration) -> String {
    format!("{} ({}s)", duration, duration.as_seconds_f64())
}

/// One line per duration, numbered from 1
pub fn format_duration_list(durations: &[Duration]) -> String {
    if durations.is_empty() {
        return "No durations found.".to_string();
    }
    durations
        .iter()
        .enumerate()
        .map(|(i, d)| format!("{:>3}  {}", i + 1, format_duration_line(d)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Key column padded to the widest key; flags print as `(flag)`
pub fn format_prefixed_table(map: &BTreeMap<String, Option<Duration>>) -> String {
    if map.is_empty() {
        return "No durations found.".to_string();
    }
    let width = map.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    map.iter()
        .map(|(key, value)| match value {
            Some(d) => format!("{:<width$}  {}", key, format_duration_line(d), width = width),
            None => format!("{:<width$}  (flag)", key, width = width),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wall-clock time at which `duration` has elapsed from `now`
pub fn format_elapses_at<Tz: TimeZone>(duration: &Duration, now: DateTime<Tz>) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    let delta: chrono::Duration = (*duration).into();
    now.checked_add_signed(delta)
        .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
}

pub fn format_elapses_at_local(duration: &Duration) -> Option<String> {
    format_elapses_at(duration, Local::now())
}

pub fn duration_json(input: &str, duration: &Duration) -> Value {
    json!({
        "input": input,
        "duration": duration.to_string(),
        "ticks": duration.ticks(),
        "seconds": duration.as_seconds_f64(),
    })
}

pub fn prefixed_json(input: &str, map: &BTreeMap<String, Option<Duration>>) -> Value {
    let values: serde_json::Map<String, Value> = map
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Some(d) => duration_json(input, d),
                None => Value::Null,
            };
            (key.clone(), value)
        })
        .collect();
    Value::Object(values)
}
