//! Calendar events repository.
//!
//! # Responsibility
//! - List, add and delete day-keyed events on top of the document store.
//! - Enforce the per-day no-overlap invariant inside the transaction.
//!
//! # Invariants
//! - The overlap check runs against the state loaded under the same lock
//!   that guards the write, so two concurrent inserts cannot both commit.
//! - A rejected insert leaves the persisted document untouched.
//! - Deleting the last event of a day removes the day key.

use crate::model::event::{Event, EventsDocument};
use crate::repo::error::{EventConflict, NotFoundTarget, RepoError, RepoResult};
use crate::schedule::overlap::find_conflict;
use crate::store::{DocumentBackend, DocumentStore};
use log::{info, warn};

/// Repository interface for calendar events.
pub trait EventRepository {
    /// Returns the current events document.
    fn list_events(&self) -> RepoResult<EventsDocument>;
    /// Appends `event` to `day` unless it overlaps an existing event there.
    fn add_event(&self, day: &str, event: Event) -> RepoResult<EventsDocument>;
    /// Removes the event at `index` of `day`.
    fn delete_event(&self, day: &str, index: usize) -> RepoResult<EventsDocument>;
}

/// Document-store-backed events repository.
pub struct StoreEventRepository<'store, B: DocumentBackend> {
    store: &'store DocumentStore<B>,
}

impl<'store, B: DocumentBackend> StoreEventRepository<'store, B> {
    pub fn new(store: &'store DocumentStore<B>) -> Self {
        Self { store }
    }
}

impl<B: DocumentBackend> EventRepository for StoreEventRepository<'_, B> {
    fn list_events(&self) -> RepoResult<EventsDocument> {
        Ok(self.store.load::<EventsDocument>()?)
    }

    fn add_event(&self, day: &str, event: Event) -> RepoResult<EventsDocument> {
        event.validate()?;

        self.store.transact(|document: &mut EventsDocument| {
            let existing = document.day(day).unwrap_or(&[]);
            if let Some(conflict) = find_conflict(existing, &event) {
                warn!(
                    "event=event_add module=repo status=conflict start={} end={} conflict_index={}",
                    event.start(),
                    event.end(),
                    conflict.index
                );
                return Err(RepoError::Conflict(EventConflict {
                    day: day.to_string(),
                    index: conflict.index,
                    existing: conflict.existing.clone(),
                }));
            }

            let (start, end) = (event.start(), event.end());
            let events = document.days.entry(day.to_string()).or_default();
            events.push(event);
            info!(
                "event=event_add module=repo status=ok start={start} end={end} index={}",
                events.len() - 1
            );
            Ok(document.clone())
        })
    }

    fn delete_event(&self, day: &str, index: usize) -> RepoResult<EventsDocument> {
        self.store.transact(|document: &mut EventsDocument| {
            let Some(events) = document.days.get_mut(day) else {
                return Err(RepoError::NotFound(NotFoundTarget::Day(day.to_string())));
            };
            if index >= events.len() {
                return Err(RepoError::NotFound(NotFoundTarget::EventIndex {
                    day: day.to_string(),
                    index,
                }));
            }

            events.remove(index);
            if events.is_empty() {
                document.days.shift_remove(day);
            }
            info!("event=event_delete module=repo status=ok index={index}");
            Ok(document.clone())
        })
    }
}
