//! Free-text note model.
//!
//! # Invariants
//! - `id` is unique within the document and never reused after deletion.
//! - `next_id` never decreases.
//! - Unknown categories are coerced to [`NoteCategory::Personal`] on both
//!   read and write.

use crate::model::validation::{check_text_len, ValidationError};
use crate::store::{Document, ResourceKey};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

pub type NoteId = u64;

/// First id handed out by a fresh notes document.
pub const FIRST_NOTE_ID: NoteId = 1;

/// Closed set of note categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteCategory {
    #[default]
    Personal,
    Work,
    Meeting,
    Idea,
}

impl NoteCategory {
    pub const ALL: [NoteCategory; 4] = [
        NoteCategory::Personal,
        NoteCategory::Work,
        NoteCategory::Meeting,
        NoteCategory::Idea,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Work => "work",
            Self::Meeting => "meeting",
            Self::Idea => "idea",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
    }

    /// Parses `value`, falling back to the default category.
    pub fn coerce(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub id: NoteId,
    pub text: String,
    pub category: NoteCategory,
}

impl Note {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text_len("note text", &self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotesDocument {
    pub notes: Vec<Note>,
    pub next_id: NoteId,
}

impl Default for NotesDocument {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            next_id: FIRST_NOTE_ID,
        }
    }
}

impl NotesDocument {
    pub fn position(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }
}

#[derive(Deserialize)]
struct StoredNote {
    id: NoteId,
    text: String,
    #[serde(default)]
    category: Option<String>,
}

impl Document for NotesDocument {
    const KEY: ResourceKey = ResourceKey::Notes;

    fn from_lenient(value: Value) -> Option<Self> {
        let Value::Object(mut map) = value else {
            return None;
        };
        let next_id = map
            .get("next_id")
            .and_then(Value::as_u64)
            .unwrap_or(FIRST_NOTE_ID);
        let entries = match map.remove("notes") {
            Some(Value::Array(entries)) => entries,
            _ => Vec::new(),
        };

        let total = entries.len();
        let mut seen = HashSet::new();
        let notes: Vec<Note> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<StoredNote>(entry).ok())
            .filter(|stored| seen.insert(stored.id))
            .map(|stored| Note {
                id: stored.id,
                category: stored
                    .category
                    .as_deref()
                    .map(NoteCategory::coerce)
                    .unwrap_or_default(),
                text: stored.text,
            })
            .collect();
        if notes.len() < total {
            warn!(
                "event=notes_decode module=model status=dropped count={}",
                total - notes.len()
            );
        }

        Some(Self { notes, next_id })
    }
}
