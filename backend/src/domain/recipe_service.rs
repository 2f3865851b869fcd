//! Recipe domain service.
//!
//! Validates payloads, delegates storage to a [`RecipeRepository`] and maps
//! repository failures onto the shared error payload.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError, RecipeService};
use crate::domain::{Error, Recipe, RecipeDraft, RecipePatch, RecipeValidationError, UserId};

fn map_repository_error(error: RecipeRepositoryError) -> Error {
    match error {
        RecipeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("recipe repository unavailable: {message}"))
        }
        RecipeRepositoryError::Query { message } => {
            Error::internal(format!("recipe repository error: {message}"))
        }
    }
}

fn map_validation_error(error: RecipeValidationError) -> Error {
    let details = match error.index() {
        Some(index) => json!({ "field": error.field(), "index": index, "code": "invalid_value" }),
        None => json!({ "field": error.field(), "code": "invalid_value" }),
    };
    Error::invalid_request(error.to_string()).with_details(details)
}

/// Recipe service implementing [`RecipeService`].
#[derive(Clone)]
pub struct RecipeServiceImpl<R> {
    recipe_repo: Arc<R>,
}

impl<R> RecipeServiceImpl<R> {
    /// Create a service backed by `recipe_repo`.
    pub fn new(recipe_repo: Arc<R>) -> Self {
        Self { recipe_repo }
    }
}

#[async_trait]
impl<R> RecipeService for RecipeServiceImpl<R>
where
    R: RecipeRepository,
{
    async fn create(&self, draft: RecipeDraft) -> Result<Recipe, Error> {
        draft.validate().map_err(map_validation_error)?;
        let recipe = self
            .recipe_repo
            .save(draft)
            .await
            .map_err(map_repository_error)?;
        info!(recipe_id = %recipe.id, user_id = %recipe.user_id, "recipe created");
        Ok(recipe)
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<Recipe>, Error> {
        self.recipe_repo
            .find_all(user_id)
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, id: &Uuid, user_id: &UserId) -> Result<Option<Recipe>, Error> {
        self.recipe_repo
            .find_by_id(id, user_id)
            .await
            .map_err(map_repository_error)
    }

    async fn update(
        &self,
        id: &Uuid,
        user_id: &UserId,
        patch: RecipePatch,
    ) -> Result<Option<Recipe>, Error> {
        patch.validate().map_err(map_validation_error)?;
        let updated = self
            .recipe_repo
            .update(id, user_id, patch)
            .await
            .map_err(map_repository_error)?;
        if updated.is_some() {
            info!(recipe_id = %id, %user_id, "recipe updated");
        }
        Ok(updated)
    }

    async fn delete(&self, id: &Uuid, user_id: &UserId) -> Result<Option<Recipe>, Error> {
        let deleted = self
            .recipe_repo
            .delete_by_id(id, user_id)
            .await
            .map_err(map_repository_error)?;
        if deleted.is_some() {
            info!(recipe_id = %id, %user_id, "recipe deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
#[path = "recipe_service_tests.rs"]
mod tests;
