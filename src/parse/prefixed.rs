//! Prefix and keyword routing
//!
//! Splits text around caller-chosen words and parses the durations that
//! follow them:
//!
//! ```text
//! "wait 5m then retry for 1:30 now"
//!   prefixes [wait, for], keywords [now]
//!   -> { wait: 5m, for: 1h30m, now: None }
//! ```
//!
//! Prefixes claim the next duration after them, even across an empty span.
//! When several are waiting, the nearest one wins (`wait for 5m` gives `for`
//! the 5m and leaves `wait` as `None`). Only the first duration of a span is
//! claimed. Keywords are presence flags and map to `None`. Durations nobody
//! claims get positional keys `"0"`, `"1"`, ... When `":"` is registered
//! as a prefix and the first unclaimed span starts with a colon, its
//! duration is keyed `":"` instead.

use std::collections::BTreeMap;

use log::debug;

use crate::models::Duration;
use crate::parse::error::ParseError;
use crate::parse::options::ParseOptions;
use crate::parse::parse_many;

const COLON_KEY: &str = ":";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerKind {
    Prefix,
    Keyword,
}

#[derive(Debug)]
struct Marker<'w> {
    start: usize,
    end: usize,
    word: &'w str,
    kind: MarkerKind,
}

pub fn try_parse_prefixed(
    text: &str,
    prefixes: &[&str],
    keywords: &[&str],
    options: &ParseOptions,
) -> Option<BTreeMap<String, Option<Duration>>> {
    parse_prefixed(text, prefixes, keywords, options).ok()
}

/// Parse `text` into a map from prefix, keyword or position to duration
pub fn parse_prefixed(
    text: &str,
    prefixes: &[&str],
    keywords: &[&str],
    options: &ParseOptions,
) -> Result<BTreeMap<String, Option<Duration>>, ParseError> {
    let chars: Vec<char> = text.chars().collect();
    let markers = find_markers(&chars, prefixes, keywords);

    let mut router = Router {
        map: BTreeMap::new(),
        pending: Vec::new(),
        next_position: 0,
        seen_unclaimed_span: false,
        colon_key: prefixes.contains(&COLON_KEY),
    };

    let lead_end = markers.first().map_or(chars.len(), |m| m.start);
    router.route_span(&collect(&chars[..lead_end]), options)?;

    for (index, marker) in markers.iter().enumerate() {
        match marker.kind {
            MarkerKind::Keyword => {
                router.map.entry(marker.word.to_string()).or_insert(None);
            }
            MarkerKind::Prefix => {
                let already_set = router.map.contains_key(marker.word)
                    || router.pending.iter().any(|p| p == marker.word);
                if !already_set {
                    router.pending.push(marker.word.to_string());
                }
            }
        }
        let span_end = markers.get(index + 1).map_or(chars.len(), |next| next.start);
        router.route_span(&collect(&chars[marker.end..span_end]), options)?;
    }

    for prefix in router.pending.drain(..) {
        router.map.entry(prefix).or_insert(None);
    }
    Ok(router.map)
}

struct Router {
    map: BTreeMap<String, Option<Duration>>,
    /// Prefixes still waiting for a duration, newest last
    pending: Vec<String>,
    next_position: usize,
    seen_unclaimed_span: bool,
    colon_key: bool,
}

impl Router {
    fn route_span(&mut self, span: &str, options: &ParseOptions) -> Result<(), ParseError> {
        let durations = parse_many(span, options, usize::MAX)?;
        let mut unclaimed_here = false;

        for (index, duration) in durations.into_iter().enumerate() {
            if index == 0 {
                if let Some(prefix) = self.pending.pop() {
                    debug!("prefix '{}' -> {}", prefix, duration);
                    self.map.insert(prefix, Some(duration));
                    continue;
                }
            }

            let key = if !self.seen_unclaimed_span
                && !unclaimed_here
                && self.colon_key
                && span.trim_start().starts_with(':')
            {
                COLON_KEY.to_string()
            } else {
                let key = self.next_position.to_string();
                self.next_position += 1;
                key
            };
            unclaimed_here = true;
            debug!("unclaimed '{}' -> {}", key, duration);
            self.map.insert(key, Some(duration));
        }

        if unclaimed_here {
            self.seen_unclaimed_span = true;
        }
        Ok(())
    }
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Whole-word, case-insensitive occurrences of prefixes and keywords.
/// Longer words win where two could match at the same place.
fn find_markers<'w>(chars: &[char], prefixes: &[&'w str], keywords: &[&'w str]) -> Vec<Marker<'w>> {
    let mut words: Vec<(&'w str, Vec<char>, MarkerKind)> = prefixes
        .iter()
        .map(|w| (*w, MarkerKind::Prefix))
        .chain(keywords.iter().map(|w| (*w, MarkerKind::Keyword)))
        .filter(|(w, _)| !w.is_empty() && *w != COLON_KEY)
        .map(|(w, kind)| (w, w.chars().map(fold_char).collect(), kind))
        .collect();
    words.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

    let folded: Vec<char> = chars.iter().copied().map(fold_char).collect();
    let is_word_char = |i: usize| chars.get(i).map_or(false, |c| c.is_alphanumeric());

    let mut markers = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let at_boundary = i == 0 || !is_word_char(i - 1);
        let found = if at_boundary {
            words.iter().find(|(_, spelled, _)| {
                let end = i + spelled.len();
                end <= folded.len() && folded[i..end] == spelled[..] && !is_word_char(end)
            })
        } else {
            None
        };

        match found {
            Some((word, spelled, kind)) => {
                let end = i + spelled.len();
                markers.push(Marker { start: i, end, word: *word, kind: *kind });
                i = end;
            }
            None => i += 1,
        }
    }
    markers
}
