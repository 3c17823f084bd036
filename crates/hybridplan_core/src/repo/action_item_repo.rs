//! Action items repository.
//!
//! # Responsibility
//! - Category-scoped, index-addressed create/update/delete of action items.
//! - Whole-plan replacement for freshly generated plans.
//!
//! # Invariants
//! - Category strings are checked against the fixed set before the store
//!   is touched; an invalid category never mutates anything.
//! - Deleting index `i` shifts later items of the same category down by one.
//! - Returned mappings always contain every category.

use crate::model::action_item::{ActionCategory, ActionItem, ActionItemsDocument};
use crate::model::validation::ValidationError;
use crate::repo::error::{NotFoundTarget, RepoError, RepoResult};
use crate::store::{DocumentBackend, DocumentStore};
use log::info;
use serde_json::Value;

/// Repository interface for categorized action items.
pub trait ActionItemRepository {
    fn list(&self) -> RepoResult<ActionItemsDocument>;
    fn create(&self, category: &str, item: ActionItem) -> RepoResult<ActionItemsDocument>;
    fn update(
        &self,
        category: &str,
        index: usize,
        item: ActionItem,
    ) -> RepoResult<ActionItemsDocument>;
    fn delete(&self, category: &str, index: usize) -> RepoResult<ActionItemsDocument>;
    /// Replaces every category with the valid parts of `plan`.
    fn replace_all(&self, plan: Value) -> RepoResult<ActionItemsDocument>;
}

pub struct StoreActionItemRepository<'store, B: DocumentBackend> {
    store: &'store DocumentStore<B>,
}

impl<'store, B: DocumentBackend> StoreActionItemRepository<'store, B> {
    pub fn new(store: &'store DocumentStore<B>) -> Self {
        Self { store }
    }
}

impl<B: DocumentBackend> ActionItemRepository for StoreActionItemRepository<'_, B> {
    fn list(&self) -> RepoResult<ActionItemsDocument> {
        Ok(self.store.load::<ActionItemsDocument>()?)
    }

    fn create(&self, category: &str, item: ActionItem) -> RepoResult<ActionItemsDocument> {
        let category = parse_category(category)?;
        self.store.transact(|document: &mut ActionItemsDocument| {
            let items = document.items_mut(category);
            items.push(item);
            info!(
                "event=action_item_create module=repo status=ok category={} index={}",
                category.as_str(),
                items.len() - 1
            );
            Ok(document.clone())
        })
    }

    fn update(
        &self,
        category: &str,
        index: usize,
        item: ActionItem,
    ) -> RepoResult<ActionItemsDocument> {
        let category = parse_category(category)?;
        self.store.transact(|document: &mut ActionItemsDocument| {
            let slot = document
                .items_mut(category)
                .get_mut(index)
                .ok_or(RepoError::NotFound(NotFoundTarget::ActionItemIndex {
                    category,
                    index,
                }))?;
            *slot = item;
            info!(
                "event=action_item_update module=repo status=ok category={} index={index}",
                category.as_str()
            );
            Ok(document.clone())
        })
    }

    fn delete(&self, category: &str, index: usize) -> RepoResult<ActionItemsDocument> {
        let category = parse_category(category)?;
        self.store.transact(|document: &mut ActionItemsDocument| {
            let items = document.items_mut(category);
            if index >= items.len() {
                return Err(RepoError::NotFound(NotFoundTarget::ActionItemIndex {
                    category,
                    index,
                }));
            }
            items.remove(index);
            info!(
                "event=action_item_delete module=repo status=ok category={} index={index}",
                category.as_str()
            );
            Ok(document.clone())
        })
    }

    fn replace_all(&self, plan: Value) -> RepoResult<ActionItemsDocument> {
        let Some(replacement) = ActionItemsDocument::from_plan(plan) else {
            return Err(RepoError::Validation(ValidationError::MalformedPlan));
        };
        self.store.transact(|document: &mut ActionItemsDocument| {
            *document = replacement;
            info!(
                "event=action_items_replace module=repo status=ok items={}",
                document.categories.values().map(Vec::len).sum::<usize>()
            );
            Ok(document.clone())
        })
    }
}

fn parse_category(value: &str) -> RepoResult<ActionCategory> {
    ActionCategory::parse(value).ok_or_else(|| RepoError::InvalidCategory(value.to_string()))
}
