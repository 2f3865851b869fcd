//! Grocery list domain service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{GroceryListRepository, GroceryListRepositoryError, GroceryListService};
use crate::domain::{
    Error, GroceryItem, GroceryItemDraft, GroceryItemPatch, GroceryList, GroceryListDraft,
    GroceryListPatch, GroceryListSummary, GroceryValidationError, UserId,
};

fn map_repository_error(error: GroceryListRepositoryError) -> Error {
    match error {
        GroceryListRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("grocery list repository unavailable: {message}"))
        }
        GroceryListRepositoryError::Query { message } => {
            Error::internal(format!("grocery list repository error: {message}"))
        }
    }
}

fn map_validation_error(error: GroceryValidationError) -> Error {
    Error::invalid_request(error.to_string())
        .with_details(json!({ "field": error.field(), "code": "invalid_value" }))
}

/// Grocery list service implementing [`GroceryListService`].
#[derive(Clone)]
pub struct GroceryListServiceImpl<R> {
    list_repo: Arc<R>,
}

impl<R> GroceryListServiceImpl<R> {
    /// Create a service backed by `list_repo`.
    pub fn new(list_repo: Arc<R>) -> Self {
        Self { list_repo }
    }
}

#[async_trait]
impl<R> GroceryListService for GroceryListServiceImpl<R>
where
    R: GroceryListRepository,
{
    async fn create(&self, draft: GroceryListDraft) -> Result<GroceryList, Error> {
        draft.validate().map_err(map_validation_error)?;
        let list = self
            .list_repo
            .save(draft)
            .await
            .map_err(map_repository_error)?;
        info!(list_id = %list.id, user_id = %list.user_id, "grocery list created");
        Ok(list)
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<GroceryListSummary>, Error> {
        self.list_repo
            .find_all(user_id)
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, id: &Uuid, user_id: &UserId) -> Result<Option<GroceryList>, Error> {
        self.list_repo
            .find_by_id(id, user_id)
            .await
            .map_err(map_repository_error)
    }

    async fn update(
        &self,
        id: &Uuid,
        user_id: &UserId,
        patch: GroceryListPatch,
    ) -> Result<Option<GroceryList>, Error> {
        patch.validate().map_err(map_validation_error)?;
        self.list_repo
            .update(id, user_id, patch)
            .await
            .map_err(map_repository_error)
    }

    async fn delete(&self, id: &Uuid, user_id: &UserId) -> Result<Option<GroceryList>, Error> {
        let deleted = self
            .list_repo
            .delete_by_id(id, user_id)
            .await
            .map_err(map_repository_error)?;
        if let Some(list) = &deleted {
            info!(list_id = %id, %user_id, items = list.items.len(), "grocery list deleted");
        }
        Ok(deleted)
    }

    async fn add_item(
        &self,
        list_id: &Uuid,
        user_id: &UserId,
        draft: GroceryItemDraft,
    ) -> Result<Option<GroceryItem>, Error> {
        draft.validate().map_err(map_validation_error)?;
        self.list_repo
            .add_item(list_id, user_id, draft)
            .await
            .map_err(map_repository_error)
    }

    async fn update_item(
        &self,
        list_id: &Uuid,
        item_id: &Uuid,
        user_id: &UserId,
        patch: GroceryItemPatch,
    ) -> Result<Option<GroceryItem>, Error> {
        patch.validate().map_err(map_validation_error)?;
        self.list_repo
            .update_item(list_id, item_id, user_id, patch)
            .await
            .map_err(map_repository_error)
    }

    async fn delete_item(
        &self,
        list_id: &Uuid,
        item_id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<GroceryItem>, Error> {
        self.list_repo
            .delete_item(list_id, item_id, user_id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "grocery_list_service_tests.rs"]
mod tests;
