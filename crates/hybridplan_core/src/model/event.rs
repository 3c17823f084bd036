//! Calendar event model.
//!
//! # Responsibility
//! - Define the per-day event record and the events document.
//! - Decode persisted events leniently, one entry at a time.
//!
//! # Invariants
//! - An event occupies the half-open hour interval `[hour, hour + duration)`.
//! - Within one day no two intervals overlap (enforced by the repository).
//! - The document never keeps a day with no events.

use crate::model::validation::{
    ValidationError, MAX_EVENT_DURATION, MAX_EVENT_HOUR, MIN_EVENT_DURATION,
};
use crate::store::{Document, ResourceKey};
use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_duration() -> u8 {
    MIN_EVENT_DURATION
}

/// One calendar entry inside a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Start hour of day, `0..=23`.
    pub hour: u8,
    /// Length in whole hours, `1..=24`.
    #[serde(default = "default_duration")]
    pub duration: u8,
}

impl Event {
    pub fn new(title: impl Into<String>, hour: u8, duration: u8) -> Self {
        Self {
            title: title.into(),
            description: None,
            hour,
            duration,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Inclusive start hour.
    pub fn start(&self) -> u16 {
        u16::from(self.hour)
    }

    /// Exclusive end hour; may pass 24 for events running past midnight.
    pub fn end(&self) -> u16 {
        u16::from(self.hour) + u16::from(self.duration)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.hour > MAX_EVENT_HOUR {
            return Err(ValidationError::HourOutOfRange(self.hour));
        }
        if !(MIN_EVENT_DURATION..=MAX_EVENT_DURATION).contains(&self.duration) {
            return Err(ValidationError::DurationOutOfRange(self.duration));
        }
        Ok(())
    }
}

/// Day name to events. Days keep the order they were first written in;
/// events keep insertion order per day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventsDocument {
    pub days: IndexMap<String, Vec<Event>>,
}

impl EventsDocument {
    pub fn day(&self, day: &str) -> Option<&[Event]> {
        self.days.get(day).map(Vec::as_slice)
    }

    /// Total number of events across all days.
    pub fn event_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl Document for EventsDocument {
    const KEY: ResourceKey = ResourceKey::Events;

    fn from_lenient(value: Value) -> Option<Self> {
        let Value::Object(map) = value else {
            return None;
        };
        let mut days = IndexMap::new();
        for (day, entries) in map {
            let Value::Array(entries) = entries else {
                warn!("event=events_decode module=model status=dropped reason=day_not_list");
                continue;
            };
            let total = entries.len();
            let events: Vec<Event> = entries.into_iter().filter_map(decode_event).collect();
            if events.len() < total {
                warn!(
                    "event=events_decode module=model status=dropped count={}",
                    total - events.len()
                );
            }
            if !events.is_empty() {
                days.insert(day, events);
            }
        }
        Some(Self { days })
    }
}

fn decode_event(value: Value) -> Option<Event> {
    let event: Event = serde_json::from_value(value).ok()?;
    event.validate().ok()?;
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::{Event, EventsDocument};
    use crate::model::validation::ValidationError;
    use crate::store::Document;
    use serde_json::json;

    #[test]
    fn validate_checks_ranges_and_title() {
        assert!(Event::new("standup", 9, 1).validate().is_ok());
        assert_eq!(
            Event::new("  ", 9, 1).validate(),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(
            Event::new("late", 24, 1).validate(),
            Err(ValidationError::HourOutOfRange(24))
        );
        assert_eq!(
            Event::new("zero", 9, 0).validate(),
            Err(ValidationError::DurationOutOfRange(0))
        );
        assert_eq!(
            Event::new("long", 0, 25).validate(),
            Err(ValidationError::DurationOutOfRange(25))
        );
    }

    #[test]
    fn lenient_decode_drops_bad_entries_and_empty_days() {
        let raw = json!({
            "Monday": [
                {"title": "standup", "hour": 9},
                {"title": "", "hour": 10, "duration": 1},
                "not an event",
                {"title": "review", "hour": 30, "duration": 1},
                {"title": "lunch", "hour": 12, "duration": 1, "extra": true}
            ],
            "Tuesday": [{"hour": 8}],
            "Wednesday": "oops"
        });

        let document = EventsDocument::from_lenient(raw).unwrap();
        let monday = document.day("Monday").unwrap();
        assert_eq!(monday.len(), 2);
        assert_eq!(monday[0].duration, 1);
        assert_eq!(monday[0].description, None);
        assert_eq!(monday[1].title, "lunch");
        assert!(document.day("Tuesday").is_none());
        assert!(document.day("Wednesday").is_none());
    }

    #[test]
    fn lenient_decode_keeps_day_order_from_file() {
        let raw: serde_json::Value =
            serde_json::from_str(r#"{"Monday": [{"title": "a", "hour": 9}], "Friday": [{"title": "b", "hour": 9}], "Tuesday": [{"title": "c", "hour": 9}]}"#)
                .unwrap();
        let document = EventsDocument::from_lenient(raw).unwrap();
        let days: Vec<&str> = document.days.keys().map(String::as_str).collect();
        assert_eq!(days, vec!["Monday", "Friday", "Tuesday"]);
    }

    #[test]
    fn non_object_top_level_is_rejected() {
        assert!(EventsDocument::from_lenient(json!([1, 2, 3])).is_none());
    }

    #[test]
    fn serializes_as_plain_day_mapping() {
        let mut document = EventsDocument::default();
        document.days.insert(
            "Friday".to_string(),
            vec![Event::new("retro", 15, 2).with_description("sprint 12")],
        );
        let json = serde_json::to_value(&document).unwrap();
        assert_eq!(
            json,
            json!({"Friday": [{"title": "retro", "description": "sprint 12", "hour": 15, "duration": 2}]})
        );
    }
}
