//! Driving port for recipe use cases.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Recipe, RecipeDraft, RecipePatch, UserId};

/// Recipe operations offered to inbound adapters.
///
/// Absent or foreign records resolve to `Ok(None)`; `Err` is reserved for
/// invalid input and infrastructure failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeService: Send + Sync {
    /// Validate and store a new recipe.
    async fn create(&self, draft: RecipeDraft) -> Result<Recipe, Error>;

    /// Every recipe the user owns.
    async fn list(&self, user_id: &UserId) -> Result<Vec<Recipe>, Error>;

    /// One of the user's recipes.
    async fn get(&self, id: &Uuid, user_id: &UserId) -> Result<Option<Recipe>, Error>;

    /// Validate and apply a partial update.
    async fn update(
        &self,
        id: &Uuid,
        user_id: &UserId,
        patch: RecipePatch,
    ) -> Result<Option<Recipe>, Error>;

    /// Delete one of the user's recipes.
    async fn delete(&self, id: &Uuid, user_id: &UserId) -> Result<Option<Recipe>, Error>;
}
