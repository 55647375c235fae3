//! Merge/reduce engine
//!
//! Walks tokens left to right, folding each into a running accumulator.
//! A token that cannot contribute (no unit, ambiguous unit, too many
//! columns, unrepresentable value) closes the accumulator and is recorded
//! as a failure. With strict big-to-small ordering, a token whose unit is
//! coarser than the finest unit merged so far closes the accumulator and
//! starts a new one, so `5m 10h` yields two durations rather than an error.
//!
//! Sign: the first token of a run decides it. When the run started
//! negative, later tokens that are not themselves negative are subtracted,
//! so `-1h 30m` is minus ninety minutes and `-1h -30m` is the same.

use log::debug;

use crate::models::Duration;
use crate::parse::error::ParseError;
use crate::parse::options::ParseOptions;
use crate::parse::token::Token;
use crate::parse::tokenizer::Scanned;

/// Outcome of reducing a token stream
#[derive(Debug, Default)]
pub struct Reduction {
    /// Completed durations in source order
    pub durations: Vec<Duration>,
    /// Every token that was skipped, in source order
    pub failures: Vec<ParseError>,
}

/// Reduce `tokens` into at most `max` durations. Numbers the scanner could
/// not read are recorded as failures in place.
pub fn reduce(tokens: Vec<Scanned>, options: &ParseOptions, max: usize) -> Reduction {
    let mut reducer = Reducer {
        options,
        max,
        acc: None,
        reduction: Reduction::default(),
    };
    for token in tokens {
        if reducer.is_full() {
            break;
        }
        match token {
            Ok(token) => reducer.push(token),
            Err(failure) => reducer.fail(failure),
        }
    }
    reducer.finish()
}

struct Reducer<'a> {
    options: &'a ParseOptions,
    max: usize,
    acc: Option<Token>,
    reduction: Reduction,
}

impl<'a> Reducer<'a> {
    fn is_full(&self) -> bool {
        self.reduction.durations.len() >= self.max
    }

    fn push(&mut self, token: Token) {
        let options = self.options;
        if token.is_null() {
            return;
        }
        if let Some(failure) = token.failure(options) {
            self.fail(failure);
            return;
        }
        let value = match token.to_duration(options) {
            Ok(value) => value,
            Err(failure) => {
                self.fail(failure);
                return;
            }
        };

        let Some(acc) = self.acc.take() else {
            self.acc = Some(token);
            return;
        };

        if options.strict_big_to_small {
            let finest = acc.smallest_unit(options);
            let unit = token.best_guess_unit(options);
            if finest.is_time_unit() && unit.is_time_unit() && unit < finest {
                debug!("'{}' is {} after {}; starting a new duration", token.text(), unit, finest);
                self.close(acc);
                self.acc = Some(token);
                return;
            }
        }

        let acc_value = match acc.to_duration(options) {
            Ok(value) => value,
            Err(failure) => {
                self.fail(failure);
                self.acc = Some(token);
                return;
            }
        };
        let initial_negative = acc.is_initial_negative();
        let value = if initial_negative && !token.is_initial_negative() {
            value.checked_neg()
        } else {
            Some(value)
        };

        match value.and_then(|v| acc_value.checked_add(v)) {
            Some(total) => {
                let token_smallest = token.smallest_unit(options);
                let smallest_unit = if token_smallest.is_time_unit() {
                    token_smallest
                } else {
                    acc.smallest_unit(options)
                };
                debug!("merged '{}' -> {} (finest {})", token.text(), total, smallest_unit);
                self.acc = Some(Token::Merged { duration: total, smallest_unit, initial_negative });
            }
            None => {
                self.close(acc);
                self.fail(ParseError::overflow(token.text()));
            }
        }
    }

    /// Close any open run and record `failure`
    fn fail(&mut self, failure: ParseError) {
        debug!("skipping token: {}", failure);
        if let Some(acc) = self.acc.take() {
            self.close(acc);
        }
        self.reduction.failures.push(failure);
    }

    fn close(&mut self, acc: Token) {
        if self.is_full() {
            return;
        }
        match acc.to_duration(self.options) {
            Ok(duration) => self.reduction.durations.push(duration),
            Err(failure) => self.reduction.failures.push(failure),
        }
    }

    fn finish(mut self) -> Reduction {
        if let Some(acc) = self.acc.take() {
            self.close(acc);
        }
        self.reduction
    }
}
