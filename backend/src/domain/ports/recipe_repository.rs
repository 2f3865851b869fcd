//! Driven port for recipe persistence.
//!
//! Every operation is scoped to an owner. Reads return only the owner's
//! records; mutations of a record the owner cannot see resolve to `Ok(None)`
//! rather than an error.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Recipe, RecipeDraft, RecipePatch, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// The store could not be reached.
        Connection => "recipe repository connection failed: {message}",
        /// A query failed or returned unusable data.
        Query => "recipe repository query failed: {message}",
    }
}

/// Port for storing and retrieving recipes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// All recipes owned by `user_id`, oldest first.
    async fn find_all(&self, user_id: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// The recipe with `id` if `user_id` owns it.
    async fn find_by_id(
        &self,
        id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Persist a new recipe with a fresh identifier and stamps.
    async fn save(&self, draft: RecipeDraft) -> Result<Recipe, RecipeRepositoryError>;

    /// Merge `patch` into the owner's recipe and return the result.
    async fn update(
        &self,
        id: &Uuid,
        user_id: &UserId,
        patch: RecipePatch,
    ) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Remove the owner's recipe and return its last state.
    async fn delete_by_id(
        &self,
        id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError>;
}
