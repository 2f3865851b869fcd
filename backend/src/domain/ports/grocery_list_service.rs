//! Driving port for grocery list use cases.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Error, GroceryItem, GroceryItemDraft, GroceryItemPatch, GroceryList, GroceryListDraft,
    GroceryListPatch, GroceryListSummary, UserId,
};

/// Grocery list and item operations offered to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroceryListService: Send + Sync {
    /// Validate and store a new, empty list.
    async fn create(&self, draft: GroceryListDraft) -> Result<GroceryList, Error>;

    /// Summaries of the user's lists.
    async fn list(&self, user_id: &UserId) -> Result<Vec<GroceryListSummary>, Error>;

    /// One of the user's lists with its items.
    async fn get(&self, id: &Uuid, user_id: &UserId) -> Result<Option<GroceryList>, Error>;

    /// Validate and apply a partial list update.
    async fn update(
        &self,
        id: &Uuid,
        user_id: &UserId,
        patch: GroceryListPatch,
    ) -> Result<Option<GroceryList>, Error>;

    /// Delete one of the user's lists and its items.
    async fn delete(&self, id: &Uuid, user_id: &UserId) -> Result<Option<GroceryList>, Error>;

    /// Validate and append an item to one of the user's lists.
    async fn add_item(
        &self,
        list_id: &Uuid,
        user_id: &UserId,
        draft: GroceryItemDraft,
    ) -> Result<Option<GroceryItem>, Error>;

    /// Validate and apply a partial item update.
    async fn update_item(
        &self,
        list_id: &Uuid,
        item_id: &Uuid,
        user_id: &UserId,
        patch: GroceryItemPatch,
    ) -> Result<Option<GroceryItem>, Error>;

    /// Remove an item from one of the user's lists.
    async fn delete_item(
        &self,
        list_id: &Uuid,
        item_id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<GroceryItem>, Error>;
}
