//! Categorized action items ("Maßnahmen") model.
//!
//! # Invariants
//! - The document always holds every [`ActionCategory`], possibly empty.
//! - Items are addressed by position within their category.

use crate::store::{Document, ResourceKey};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Fixed action-item categories, keyed by their persisted names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionCategory {
    /// One-off measures.
    #[serde(rename = "einmalige_massnahmen")]
    OneOff,
    /// Workplace measures.
    #[serde(rename = "arbeitsplatz")]
    Workplace,
}

impl ActionCategory {
    pub const ALL: [ActionCategory; 2] = [ActionCategory::OneOff, ActionCategory::Workplace];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneOff => "einmalige_massnahmen",
            Self::Workplace => "arbeitsplatz",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "hoch")]
    High,
    #[serde(rename = "mittel")]
    Medium,
    #[serde(rename = "niedrig")]
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "hoch",
            Self::Medium => "mittel",
            Self::Low => "niedrig",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "hoch" => Some(Self::High),
            "mittel" => Some(Self::Medium),
            "niedrig" => Some(Self::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionItem {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl ActionItem {
    pub fn new(title: impl Into<String>, description: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActionItemsDocument {
    pub categories: BTreeMap<ActionCategory, Vec<ActionItem>>,
}

impl Default for ActionItemsDocument {
    fn default() -> Self {
        Self {
            categories: ActionCategory::ALL
                .into_iter()
                .map(|category| (category, Vec::new()))
                .collect(),
        }
    }
}

impl ActionItemsDocument {
    /// Items of one category; empty when the category holds nothing.
    pub fn items(&self, category: ActionCategory) -> &[ActionItem] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn items_mut(&mut self, category: ActionCategory) -> &mut Vec<ActionItem> {
        self.categories.entry(category).or_default()
    }

    /// Builds a document from an untrusted plan value, keeping valid parts.
    ///
    /// Unknown categories and items that fail validation are dropped; missing
    /// categories are filled in empty.
    pub fn from_plan(value: Value) -> Option<Self> {
        let Value::Object(map) = value else {
            return None;
        };
        let mut document = Self::default();
        for (name, entries) in map {
            let Some(category) = ActionCategory::parse(&name) else {
                warn!("event=action_items_decode module=model status=dropped reason=unknown_category");
                continue;
            };
            let Value::Array(entries) = entries else {
                warn!("event=action_items_decode module=model status=dropped reason=category_not_list category={category:?}");
                continue;
            };
            let total = entries.len();
            let items: Vec<ActionItem> = entries
                .into_iter()
                .filter_map(|entry| serde_json::from_value(entry).ok())
                .collect();
            if items.len() < total {
                warn!(
                    "event=action_items_decode module=model status=dropped category={} count={}",
                    category.as_str(),
                    total - items.len()
                );
            }
            document.items_mut(category).extend(items);
        }
        Some(document)
    }
}

impl Document for ActionItemsDocument {
    const KEY: ResourceKey = ResourceKey::ActionItems;

    fn from_lenient(value: Value) -> Option<Self> {
        Self::from_plan(value)
    }
}
