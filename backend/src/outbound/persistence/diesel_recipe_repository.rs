//! PostgreSQL-backed [`RecipeRepository`] using Diesel.
//!
//! Ingredient and instruction lists live in `jsonb` columns. Every mutation
//! is preceded by an owner-scoped read through [`guard_owned`], and the write
//! itself is filtered by owner as well.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::ownership::{OwnedLookup, guard_owned};
use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{Ingredient, Recipe, RecipeDraft, RecipePatch, RecipeType, UserId};

use super::diesel_error_mapping::{map_diesel_error_with, map_pool_error_with};
use super::models::{NewRecipeRow, RecipeChangeset, RecipeRow};
use super::pool::{DbPool, PoolError};
use super::schema::recipes;

/// Diesel-backed implementation of the recipe repository port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselRecipeRepository {
    /// Create a repository over `pool`, stamping records with `clock`.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn map_pool_error(error: PoolError) -> RecipeRepositoryError {
    map_pool_error_with(error, RecipeRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RecipeRepositoryError {
    map_diesel_error_with(
        error,
        RecipeRepositoryError::query,
        RecipeRepositoryError::connection,
    )
}

fn encode_list<T: Serialize>(
    values: &[T],
    field: &str,
) -> Result<serde_json::Value, RecipeRepositoryError> {
    serde_json::to_value(values)
        .map_err(|err| RecipeRepositoryError::query(format!("encode {field}: {err}")))
}

pub(crate) fn row_to_recipe(row: RecipeRow) -> Result<Recipe, RecipeRepositoryError> {
    let RecipeRow {
        id,
        user_id,
        name,
        recipe_type,
        ingredients,
        instructions,
        created_at,
        updated_at,
    } = row;
    let user_id = UserId::new(user_id)
        .map_err(|err| RecipeRepositoryError::query(format!("recipe {id} owner: {err}")))?;
    let recipe_type = recipe_type
        .parse::<RecipeType>()
        .map_err(|err| RecipeRepositoryError::query(format!("recipe {id} type: {err}")))?;
    let ingredients: Vec<Ingredient> = serde_json::from_value(ingredients)
        .map_err(|err| RecipeRepositoryError::query(format!("recipe {id} ingredients: {err}")))?;
    let instructions: Vec<String> = serde_json::from_value(instructions)
        .map_err(|err| RecipeRepositoryError::query(format!("recipe {id} instructions: {err}")))?;
    Ok(Recipe {
        id,
        user_id,
        name,
        recipe_type,
        ingredients,
        instructions,
        created_at,
        updated_at,
    })
}

#[async_trait]
impl OwnedLookup<Recipe> for DieselRecipeRepository {
    type Error = RecipeRepositoryError;
    type Id = Uuid;

    async fn find_owned(
        &self,
        id: &Uuid,
        owner: &UserId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = recipes::table
            .filter(recipes::id.eq(id))
            .filter(recipes::user_id.eq(owner.as_str()))
            .select(RecipeRow::as_select())
            .first::<RecipeRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_recipe).transpose()
    }
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn find_all(&self, user_id: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RecipeRow> = recipes::table
            .filter(recipes::user_id.eq(user_id.as_str()))
            .order(recipes::seq.asc())
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_recipe).collect()
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        self.find_owned(id, user_id).await
    }

    async fn save(&self, draft: RecipeDraft) -> Result<Recipe, RecipeRepositoryError> {
        let recipe = draft.into_recipe(Uuid::new_v4(), self.clock.as_ref());
        let ingredients = encode_list(&recipe.ingredients, "ingredients")?;
        let instructions = encode_list(&recipe.instructions, "instructions")?;
        let new_row = NewRecipeRow {
            id: recipe.id,
            user_id: recipe.user_id.as_str(),
            name: &recipe.name,
            recipe_type: recipe.recipe_type.as_str(),
            ingredients: &ingredients,
            instructions: &instructions,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(recipes::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
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
            let ingredients = encode_list(&recipe.ingredients, "ingredients")?;
            let instructions = encode_list(&recipe.instructions, "instructions")?;
            let changes = RecipeChangeset {
                name: &recipe.name,
                recipe_type: recipe.recipe_type.as_str(),
                ingredients: &ingredients,
                instructions: &instructions,
                updated_at: recipe.updated_at,
            };

            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let touched = diesel::update(
                recipes::table
                    .filter(recipes::id.eq(recipe.id))
                    .filter(recipes::user_id.eq(recipe.user_id.as_str())),
            )
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
            Ok((touched > 0).then_some(recipe))
        })
        .await
    }

    async fn delete_by_id(
        &self,
        id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        guard_owned(self, id, user_id, move |recipe: Recipe| async move {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let removed = diesel::delete(
                recipes::table
                    .filter(recipes::id.eq(recipe.id))
                    .filter(recipes::user_id.eq(recipe.user_id.as_str())),
            )
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
            Ok((removed > 0).then_some(recipe))
        })
        .await
    }
}
