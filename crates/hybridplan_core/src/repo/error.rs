//! Semantic repository errors and their boundary classification.

use crate::model::action_item::ActionCategory;
use crate::model::event::Event;
use crate::model::note::NoteId;
use crate::model::validation::ValidationError;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// What a `NotFound` error failed to locate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundTarget {
    Day(String),
    EventIndex { day: String, index: usize },
    Note(NoteId),
    ActionItemIndex {
        category: ActionCategory,
        index: usize,
    },
}

impl Display for NotFoundTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day(day) => write!(f, "day `{day}` not found"),
            Self::EventIndex { day, index } => {
                write!(f, "event index {index} not found on `{day}`")
            }
            Self::Note(id) => write!(f, "note {id} not found"),
            Self::ActionItemIndex { category, index } => write!(
                f,
                "action item index {index} not found in `{}`",
                category.as_str()
            ),
        }
    }
}

/// Rejected event insertion: the candidate intersects `existing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventConflict {
    pub day: String,
    pub index: usize,
    pub existing: Event,
}

/// Repository error for all resource operations.
#[derive(Debug)]
pub enum RepoError {
    NotFound(NotFoundTarget),
    /// Category outside the fixed action-item set.
    InvalidCategory(String),
    Conflict(EventConflict),
    Validation(ValidationError),
    Store(StoreError),
}

/// Coarse error classes for mapping onto protocol responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidCategory,
    Conflict,
    Validation,
    Storage,
}

impl ErrorKind {
    /// HTTP-class status code for boundary layers.
    pub fn status_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::InvalidCategory | Self::Conflict => 400,
            Self::Validation => 422,
            Self::Storage => 500,
        }
    }
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidCategory(_) => ErrorKind::InvalidCategory,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Store(_) => ErrorKind::Storage,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(target) => write!(f, "{target}"),
            Self::InvalidCategory(category) => write!(f, "invalid category `{category}`"),
            Self::Conflict(conflict) => write!(
                f,
                "event overlaps with `{}` at index {} on `{}`",
                conflict.existing.title, conflict.index, conflict.day
            ),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
