//! Half-open interval conflict detection.
//!
//! Intervals are `[start, end)`: an event ending at hour 9 and another
//! starting at hour 9 do not conflict.

use crate::model::event::Event;

/// First existing event that intersects `candidate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict<'a> {
    pub index: usize,
    pub existing: &'a Event,
}

/// Whether `[a_start, a_end)` and `[b_start, b_end)` intersect.
pub fn intervals_overlap(a_start: u16, a_end: u16, b_start: u16, b_end: u16) -> bool {
    a_start < b_end && a_end > b_start
}

/// Scans `existing` in order and returns the first conflict with `candidate`.
pub fn find_conflict<'a>(existing: &'a [Event], candidate: &Event) -> Option<Conflict<'a>> {
    existing
        .iter()
        .enumerate()
        .find(|(_, event)| {
            intervals_overlap(candidate.start(), candidate.end(), event.start(), event.end())
        })
        .map(|(index, existing)| Conflict { index, existing })
}
