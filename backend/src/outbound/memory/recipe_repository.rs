//! In-memory [`RecipeRepository`].

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use uuid::Uuid;

use crate::domain::ownership::{OwnedLookup, guard_owned};
use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{Recipe, RecipeDraft, RecipePatch, UserId};

/// Recipes held in a vector behind a lock, in insertion order.
///
/// Clones share the same storage.
#[derive(Clone)]
pub struct InMemoryRecipeRepository {
    recipes: Arc<RwLock<Vec<Recipe>>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryRecipeRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecipeRepository {
    /// Create an empty repository using the system clock.
    pub fn new() -> Self {
        Self {
            recipes: Arc::default(),
            clock: Arc::new(DefaultClock),
        }
    }

    /// Replace the stored recipes with `recipes`.
    pub fn with_recipes(self, recipes: impl IntoIterator<Item = Recipe>) -> Self {
        Self {
            recipes: Arc::new(RwLock::new(recipes.into_iter().collect())),
            ..self
        }
    }

    /// Stamp records with `clock` instead of the system clock.
    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self { clock, ..self }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Recipe>>, RecipeRepositoryError> {
        self.recipes
            .read()
            .map_err(|_| RecipeRepositoryError::query("recipe store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Recipe>>, RecipeRepositoryError> {
        self.recipes
            .write()
            .map_err(|_| RecipeRepositoryError::query("recipe store lock poisoned"))
    }
}

fn fresh_id(recipes: &[Recipe]) -> Uuid {
    loop {
        let id = Uuid::new_v4();
        if recipes.iter().all(|recipe| recipe.id != id) {
            return id;
        }
    }
}

#[async_trait]
impl OwnedLookup<Recipe> for InMemoryRecipeRepository {
    type Error = RecipeRepositoryError;
    type Id = Uuid;

    async fn find_owned(
        &self,
        id: &Uuid,
        owner: &UserId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let recipes = self.read()?;
        Ok(recipes
            .iter()
            .find(|recipe| recipe.id == *id && recipe.user_id == *owner)
            .cloned())
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn find_all(&self, user_id: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let recipes = self.read()?;
        Ok(recipes
            .iter()
            .filter(|recipe| recipe.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        self.find_owned(id, user_id).await
    }

    async fn save(&self, draft: RecipeDraft) -> Result<Recipe, RecipeRepositoryError> {
        let mut recipes = self.write()?;
        let recipe = draft.into_recipe(fresh_id(&recipes), self.clock.as_ref());
        recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn update(
        &self,
        id: &Uuid,
        user_id: &UserId,
        patch: RecipePatch,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        guard_owned(self, id, user_id, move |mut recipe: Recipe| async move {
            recipe.apply_patch(patch, self.clock.as_ref());
            let target = recipe.id;
            let mut recipes = self.write()?;
            Ok(recipes
                .iter_mut()
                .find(|slot| slot.id == target)
                .map(|slot| {
                    *slot = recipe.clone();
                    recipe
                }))
        })
        .await
    }

    async fn delete_by_id(
        &self,
        id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        guard_owned(self, id, user_id, move |recipe: Recipe| async move {
            let mut recipes = self.write()?;
            Ok(recipes
                .iter()
                .position(|slot| slot.id == recipe.id)
                .map(|index| recipes.remove(index)))
        })
        .await
    }
}

#[cfg(test)]
#[path = "recipe_repository_tests.rs"]
mod tests;
