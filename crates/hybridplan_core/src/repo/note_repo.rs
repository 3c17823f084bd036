//! Notes repository.
//!
//! # Responsibility
//! - Create, update and delete id-addressed notes.
//! - Allocate ids through the per-document sequence.
//!
//! # Invariants
//! - Ids are unique and never reused, even after deletion.
//! - Update keeps the note's position and id.
//! - Unknown categories are coerced to `personal`, never rejected.

use crate::model::note::{Note, NoteCategory, NoteId, NotesDocument};
use crate::repo::error::{NotFoundTarget, RepoError, RepoResult};
use crate::repo::sequence::allocate_note_id;
use crate::store::{DocumentBackend, DocumentStore};
use log::info;

/// Repository interface for notes.
pub trait NoteRepository {
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
    /// Appends a new note and returns all notes.
    fn create_note(&self, text: &str, category: &str) -> RepoResult<Vec<Note>>;
    /// Replaces text and category of note `id` in place.
    fn update_note(&self, id: NoteId, text: &str, category: &str) -> RepoResult<Vec<Note>>;
    fn delete_note(&self, id: NoteId) -> RepoResult<Vec<Note>>;
}

/// Document-store-backed notes repository.
pub struct StoreNoteRepository<'store, B: DocumentBackend> {
    store: &'store DocumentStore<B>,
}

impl<'store, B: DocumentBackend> StoreNoteRepository<'store, B> {
    pub fn new(store: &'store DocumentStore<B>) -> Self {
        Self { store }
    }
}

impl<B: DocumentBackend> NoteRepository for StoreNoteRepository<'_, B> {
    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        Ok(self.store.load::<NotesDocument>()?.notes)
    }

    fn create_note(&self, text: &str, category: &str) -> RepoResult<Vec<Note>> {
        let category = NoteCategory::coerce(category);
        let draft = Note {
            id: 0,
            text: text.to_string(),
            category,
        };
        draft.validate()?;

        self.store.transact(|document: &mut NotesDocument| {
            let id = allocate_note_id(document)?;
            document.notes.push(Note { id, ..draft });
            info!(
                "event=note_create module=repo status=ok id={id} category={}",
                category.as_str()
            );
            Ok(document.notes.clone())
        })
    }

    fn update_note(&self, id: NoteId, text: &str, category: &str) -> RepoResult<Vec<Note>> {
        let replacement = Note {
            id,
            text: text.to_string(),
            category: NoteCategory::coerce(category),
        };
        replacement.validate()?;

        self.store.transact(|document: &mut NotesDocument| {
            let Some(position) = document.position(id) else {
                return Err(RepoError::NotFound(NotFoundTarget::Note(id)));
            };
            document.notes[position] = replacement;
            info!("event=note_update module=repo status=ok id={id} position={position}");
            Ok(document.notes.clone())
        })
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<Vec<Note>> {
        self.store.transact(|document: &mut NotesDocument| {
            let Some(position) = document.position(id) else {
                return Err(RepoError::NotFound(NotFoundTarget::Note(id)));
            };
            document.notes.remove(position);
            info!("event=note_delete module=repo status=ok id={id}");
            Ok(document.notes.clone())
        })
    }
}
