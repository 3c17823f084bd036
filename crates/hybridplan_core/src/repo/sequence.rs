//! Monotonic note id allocation, scoped to one notes document.

use crate::model::note::{NoteId, NotesDocument, FIRST_NOTE_ID};
use crate::model::validation::ValidationError;
use log::{error, warn};

/// Hands out the next note id and advances the document's counter.
///
/// The id is `next_id` unless the document already holds an id at or past
/// it (hand-edited file), in which case allocation resumes after the largest
/// existing id. Ids freed by deletion are never handed out again.
///
/// # Errors
/// `IdSpaceExhausted` when the counter cannot advance; the document is left
/// untouched.
pub fn allocate_note_id(document: &mut NotesDocument) -> Result<NoteId, ValidationError> {
    let mut after_existing = FIRST_NOTE_ID;
    for note in &document.notes {
        let next = note.id.checked_add(1).ok_or_else(exhausted)?;
        after_existing = after_existing.max(next);
    }
    let id = document.next_id.max(after_existing);
    let next_id = id.checked_add(1).ok_or_else(exhausted)?;
    if id != document.next_id {
        warn!(
            "event=note_sequence_repair module=repo status=ok stored_next_id={} repaired_id={}",
            document.next_id, id
        );
    }
    document.next_id = next_id;
    Ok(id)
}

fn exhausted() -> ValidationError {
    error!("event=note_sequence_exhausted module=repo status=error");
    ValidationError::IdSpaceExhausted
}

#[cfg(test)]
mod tests {
    use super::allocate_note_id;
    use crate::model::note::{Note, NoteCategory, NotesDocument};
    use crate::model::validation::ValidationError;

    fn note(id: u64) -> Note {
        Note {
            id,
            text: format!("note {id}"),
            category: NoteCategory::Personal,
        }
    }

    #[test]
    fn allocates_from_counter_and_advances() {
        let mut document = NotesDocument::default();
        assert_eq!(allocate_note_id(&mut document), Ok(1));
        assert_eq!(allocate_note_id(&mut document), Ok(2));
        assert_eq!(document.next_id, 3);
    }

    #[test]
    fn counter_is_kept_after_deleting_the_newest_note() {
        let mut document = NotesDocument {
            notes: vec![note(1)],
            next_id: 5,
        };
        assert_eq!(allocate_note_id(&mut document), Ok(5));
    }

    #[test]
    fn stale_counter_is_repaired_past_existing_ids() {
        let mut document = NotesDocument {
            notes: vec![note(3), note(9)],
            next_id: 2,
        };
        assert_eq!(allocate_note_id(&mut document), Ok(10));
        assert_eq!(document.next_id, 11);
    }

    #[test]
    fn zero_counter_starts_at_first_id() {
        let mut document = NotesDocument {
            notes: Vec::new(),
            next_id: 0,
        };
        assert_eq!(allocate_note_id(&mut document), Ok(1));
    }

    #[test]
    fn last_allocatable_id_is_handed_out_once() {
        let mut document = NotesDocument {
            notes: Vec::new(),
            next_id: u64::MAX - 1,
        };
        assert_eq!(allocate_note_id(&mut document), Ok(u64::MAX - 1));
        assert_eq!(document.next_id, u64::MAX);
        assert_eq!(
            allocate_note_id(&mut document),
            Err(ValidationError::IdSpaceExhausted)
        );
        assert_eq!(document.next_id, u64::MAX);
    }

    #[test]
    fn existing_max_id_exhausts_the_sequence() {
        let mut document = NotesDocument {
            notes: vec![note(u64::MAX)],
            next_id: 1,
        };
        assert_eq!(
            allocate_note_id(&mut document),
            Err(ValidationError::IdSpaceExhausted)
        );
        assert_eq!(document.next_id, 1);
    }
}
