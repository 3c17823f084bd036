//! Persisted document shapes for every resource kind.
//!
//! # Responsibility
//! - Define the entities stored by each repository and their documents.
//! - Decode persisted JSON leniently, dropping entries that do not fit.
//!
//! # Invariants
//! - Every document type has an empty `Default` used for lazy creation and
//!   corrupt-file recovery.
//! - Model types hold no I/O; persistence lives in `store`.

pub mod action_item;
pub mod chat;
pub mod event;
pub mod note;
pub mod validation;
