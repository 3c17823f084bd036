//! Field-level validation errors shared by all entity kinds.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound for note and chat text, counted in chars.
pub const MAX_TEXT_CHARS: usize = 10_000;
pub const MAX_EVENT_HOUR: u8 = 23;
pub const MIN_EVENT_DURATION: u8 = 1;
pub const MAX_EVENT_DURATION: u8 = 24;

/// Entity field violations detected before any mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Event title is blank after trim.
    EmptyTitle,
    /// Event hour is outside `[0, 23]`.
    HourOutOfRange(u8),
    /// Event duration is outside `[1, 24]`.
    DurationOutOfRange(u8),
    /// Text exceeds [`MAX_TEXT_CHARS`].
    TextTooLong { field: &'static str, chars: usize },
    /// Action plan is not an object keyed by category.
    MalformedPlan,
    /// The note counter cannot advance past `u64::MAX`.
    IdSpaceExhausted,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::HourOutOfRange(hour) => {
                write!(f, "hour {hour} is outside 0..={MAX_EVENT_HOUR}")
            }
            Self::DurationOutOfRange(duration) => write!(
                f,
                "duration {duration} is outside {MIN_EVENT_DURATION}..={MAX_EVENT_DURATION}"
            ),
            Self::TextTooLong { field, chars } => write!(
                f,
                "{field} has {chars} chars; at most {MAX_TEXT_CHARS} are allowed"
            ),
            Self::MalformedPlan => write!(f, "action plan must be an object keyed by category"),
            Self::IdSpaceExhausted => write!(f, "note id space is exhausted"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn check_text_len(field: &'static str, text: &str) -> Result<(), ValidationError> {
    let chars = text.chars().count();
    if chars > MAX_TEXT_CHARS {
        return Err(ValidationError::TextTooLong { field, chars });
    }
    Ok(())
}
