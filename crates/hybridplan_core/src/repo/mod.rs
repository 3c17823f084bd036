//! Resource repositories over the JSON document store.
//!
//! # Responsibility
//! - Define one repository contract per resource kind.
//! - Run every mutation as a single load-mutate-replace transaction.
//!
//! # Invariants
//! - Repositories never cache documents between calls.
//! - Owned invariants (overlap, category membership, index bounds, id
//!   existence) are re-checked here even if the caller validated input.
//! - Semantic failures (`NotFound`, `InvalidCategory`, `Conflict`) leave
//!   persisted state untouched.

pub mod action_item_repo;
pub mod chat_repo;
pub mod error;
pub mod event_repo;
pub mod note_repo;
pub mod sequence;
