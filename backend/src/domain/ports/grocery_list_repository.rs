//! Driven port for grocery list persistence, items included.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    GroceryItem, GroceryItemDraft, GroceryItemPatch, GroceryList, GroceryListDraft,
    GroceryListPatch, GroceryListSummary, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by grocery list repository adapters.
    pub enum GroceryListRepositoryError {
        /// The store could not be reached.
        Connection => "grocery list repository connection failed: {message}",
        /// A query failed or returned unusable data.
        Query => "grocery list repository query failed: {message}",
    }
}

/// Port for storing grocery lists and their items.
///
/// Item operations first confirm the owner can see the list, then that the
/// item belongs to it. Failing either check yields `Ok(None)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroceryListRepository: Send + Sync {
    /// Summaries of every list owned by `user_id`, oldest first.
    async fn find_all(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<GroceryListSummary>, GroceryListRepositoryError>;

    /// The owner's list with `id`, items in insertion order.
    async fn find_by_id(
        &self,
        id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<GroceryList>, GroceryListRepositoryError>;

    /// Persist a new, empty list.
    async fn save(&self, draft: GroceryListDraft) -> Result<GroceryList, GroceryListRepositoryError>;

    /// Merge `patch` into the owner's list and return it with its items.
    async fn update(
        &self,
        id: &Uuid,
        user_id: &UserId,
        patch: GroceryListPatch,
    ) -> Result<Option<GroceryList>, GroceryListRepositoryError>;

    /// Remove the owner's list together with its items.
    async fn delete_by_id(
        &self,
        id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<GroceryList>, GroceryListRepositoryError>;

    /// Append an unchecked item to the owner's list.
    async fn add_item(
        &self,
        list_id: &Uuid,
        user_id: &UserId,
        draft: GroceryItemDraft,
    ) -> Result<Option<GroceryItem>, GroceryListRepositoryError>;

    /// Merge `patch` into an item of the owner's list.
    async fn update_item(
        &self,
        list_id: &Uuid,
        item_id: &Uuid,
        user_id: &UserId,
        patch: GroceryItemPatch,
    ) -> Result<Option<GroceryItem>, GroceryListRepositoryError>;

    /// Remove an item from the owner's list and return its last state.
    async fn delete_item(
        &self,
        list_id: &Uuid,
        item_id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<GroceryItem>, GroceryListRepositoryError>;
}
