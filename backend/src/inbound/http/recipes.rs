//! Recipe HTTP handlers.
//!
//! ```text
//! POST   /api/v1/recipes
//! GET    /api/v1/recipes
//! GET    /api/v1/recipes/{id}
//! PUT    /api/v1/recipes/{id}
//! DELETE /api/v1/recipes/{id}
//! ```
//!
//! Lookups that match nothing answer `200` with a `null` body.

use actix_web::{delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, Ingredient, Recipe, RecipeDraft, RecipePatch, RecipeType};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_value_error, parse_path_id};

/// Ingredient line as sent and returned over HTTP.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientBody {
    /// What to add.
    #[schema(example = "Flour")]
    pub name: String,
    /// Quantity in `unit`; finite and not negative.
    #[schema(example = 2.0)]
    pub amount: f64,
    /// Unit of measure.
    #[schema(example = "cups")]
    pub unit: String,
}

impl From<IngredientBody> for Ingredient {
    fn from(value: IngredientBody) -> Self {
        Self {
            name: value.name,
            amount: value.amount,
            unit: value.unit,
        }
    }
}

impl From<Ingredient> for IngredientBody {
    fn from(value: Ingredient) -> Self {
        Self {
            name: value.name,
            amount: value.amount,
            unit: value.unit,
        }
    }
}

/// Request payload for creating a recipe.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequestBody {
    /// Display name.
    pub name: String,
    /// `food` or `drink`.
    #[serde(rename = "type")]
    #[schema(example = "food")]
    pub recipe_type: String,
    /// Ingredient lines in order.
    pub ingredients: Vec<IngredientBody>,
    /// Method steps in order.
    pub instructions: Vec<String>,
}

/// Request payload for updating a recipe; omitted fields stay unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeRequestBody {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement type, `food` or `drink`.
    #[serde(rename = "type")]
    pub recipe_type: Option<String>,
    /// Replacement ingredient lines.
    pub ingredients: Option<Vec<IngredientBody>>,
    /// Replacement method steps.
    pub instructions: Option<Vec<String>>,
}

/// Recipe as returned to its owner.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponseBody {
    /// Server-generated identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// `food` or `drink`.
    #[serde(rename = "type")]
    pub recipe_type: String,
    /// Ingredient lines in order.
    pub ingredients: Vec<IngredientBody>,
    /// Method steps in order.
    pub instructions: Vec<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeResponseBody {
    fn from(value: Recipe) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id.into(),
            name: value.name,
            recipe_type: value.recipe_type.as_str().to_owned(),
            ingredients: value.ingredients.into_iter().map(Into::into).collect(),
            instructions: value.instructions,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

fn parse_recipe_type(raw: &str) -> Result<RecipeType, Error> {
    raw.parse::<RecipeType>().map_err(|err| {
        invalid_value_error(FieldName::new("type"), &err.value, "must be food or drink")
    })
}

fn into_patch(body: UpdateRecipeRequestBody) -> Result<RecipePatch, Error> {
    Ok(RecipePatch {
        name: body.name,
        recipe_type: body
            .recipe_type
            .as_deref()
            .map(parse_recipe_type)
            .transpose()?,
        ingredients: body
            .ingredients
            .map(|lines| lines.into_iter().map(Into::into).collect()),
        instructions: body.instructions,
    })
}

/// Create a recipe owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    request_body = CreateRecipeRequestBody,
    responses(
        (status = 200, description = "Recipe stored", body = RecipeResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateRecipeRequestBody>,
) -> ApiResult<web::Json<RecipeResponseBody>> {
    let body = payload.into_inner();
    let draft = RecipeDraft {
        user_id: user.into_inner(),
        name: body.name,
        recipe_type: parse_recipe_type(&body.recipe_type)?,
        ingredients: body.ingredients.into_iter().map(Into::into).collect(),
        instructions: body.instructions,
    };
    let recipe = state.recipes.create(draft).await?;
    Ok(web::Json(recipe.into()))
}

/// List the caller's recipes in creation order.
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    responses(
        (status = 200, description = "Recipes owned by the caller", body = [RecipeResponseBody]),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<RecipeResponseBody>>> {
    let recipes = state.recipes.list(user.user_id()).await?;
    Ok(web::Json(recipes.into_iter().map(Into::into).collect()))
}

/// Fetch one of the caller's recipes.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "The recipe, or null when the caller owns none with this id",
            body = Option<RecipeResponseBody>),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe"
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<RecipeResponseBody>>> {
    let Some(id) = parse_path_id(&path) else {
        return Ok(web::Json(None));
    };
    let recipe = state.recipes.get(&id, user.user_id()).await?;
    Ok(web::Json(recipe.map(Into::into)))
}

/// Apply a partial update to one of the caller's recipes.
#[utoipa::path(
    put,
    path = "/api/v1/recipes/{id}",
    params(("id" = String, Path, description = "Recipe id")),
    request_body = UpdateRecipeRequestBody,
    responses(
        (status = 200, description = "Updated recipe, or null when not found",
            body = Option<RecipeResponseBody>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe"
)]
#[put("/recipes/{id}")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateRecipeRequestBody>,
) -> ApiResult<web::Json<Option<RecipeResponseBody>>> {
    let patch = into_patch(payload.into_inner())?;
    let Some(id) = parse_path_id(&path) else {
        return Ok(web::Json(None));
    };
    let recipe = state.recipes.update(&id, user.user_id(), patch).await?;
    Ok(web::Json(recipe.map(Into::into)))
}

/// Delete one of the caller's recipes and return it.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Deleted recipe, or null when not found",
            body = Option<RecipeResponseBody>),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<RecipeResponseBody>>> {
    let Some(id) = parse_path_id(&path) else {
        return Ok(web::Json(None));
    };
    let recipe = state.recipes.delete(&id, user.user_id()).await?;
    Ok(web::Json(recipe.map(Into::into)))
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
