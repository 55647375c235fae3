//! Errors produced while turning text into durations.

use thiserror::Error;

use crate::models::Unit;

/// Reasons a piece of text could not be turned into a duration.
///
/// Every variant carries the token text that caused it so messages can
/// point at the offending part of the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A number had no unit and no default unit applied.
    #[error("number '{text}' has no unit and no default unit applies")]
    UnitlessNumber { text: String },

    /// A non-zero quantity of years or months.
    #[error("'{text}' is measured in {unit}, which have no fixed length (only zero is allowed)")]
    AmbiguousUnit { text: String, unit: Unit },

    /// More colon-separated columns than there are units to assign.
    #[error("'{text}' has more colon-separated columns than can be assigned units")]
    TooManyColons { text: String },

    /// The value is finer than one 100ns tick, or too large to represent.
    #[error("'{text}' cannot be represented as a duration at 100ns resolution")]
    Overflow { text: String },

    /// The scanner matched text it could not read back as a number.
    #[error("malformed numeric token '{text}'")]
    MalformedToken { text: String },

    /// Nothing in the input looked like a duration.
    #[error("no duration found in '{text}'")]
    NoDuration { text: String },
}

impl ParseError {
    pub(crate) fn overflow(text: &str) -> Self {
        ParseError::Overflow { text: text.to_string() }
    }
}
