//! Persistence core for the hybrid work planner.
//! Owns the JSON document store and every invariant enforced on its
//! documents: event overlap, note id sequencing, action-item categories.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;
pub mod store;

pub use config::{ConfigError, LogConfig, StoreConfig};
pub use logging::{
    default_log_level, init_logging, init_logging_with, logging_status, LoggingError,
};
pub use model::action_item::{ActionCategory, ActionItem, ActionItemsDocument, Priority};
pub use model::chat::{ChatDocument, ChatMessage, ChatRole};
pub use model::event::{Event, EventsDocument};
pub use model::note::{Note, NoteCategory, NoteId, NotesDocument};
pub use model::validation::{ValidationError, MAX_TEXT_CHARS};
pub use repo::action_item_repo::{ActionItemRepository, StoreActionItemRepository};
pub use repo::chat_repo::{ChatRepository, StoreChatRepository};
pub use repo::error::{ErrorKind, EventConflict, NotFoundTarget, RepoError, RepoResult};
pub use repo::event_repo::{EventRepository, StoreEventRepository};
pub use repo::note_repo::{NoteRepository, StoreNoteRepository};
pub use service::chat_service::{
    ChatService, ChatServiceError, CompletionClient, CompletionError, CompletionRequest,
};
pub use store::{
    Document, DocumentBackend, DocumentStore, FileBackend, MemoryBackend, ResourceKey, StoreError,
    StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
