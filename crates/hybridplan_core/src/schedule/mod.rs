//! Scheduling rules applied to calendar events.
//!
//! # Responsibility
//! - Detect hour-interval conflicts between events of the same day.
//!
//! # Invariants
//! - Functions here are pure; callers own locking and persistence.

pub mod overlap;
