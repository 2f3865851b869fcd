//! Recipe aggregate together with its create and update payloads.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timestamps;
use super::UserId;

/// Whether a recipe produces something to eat or to drink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeType {
    /// A dish.
    Food,
    /// A beverage.
    Drink,
}

impl RecipeType {
    /// Wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Drink => "drink",
        }
    }
}

impl fmt::Display for RecipeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when text does not name a [`RecipeType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("recipe type must be \"food\" or \"drink\", got {value:?}")]
pub struct ParseRecipeTypeError {
    /// The rejected input.
    pub value: String,
}

impl FromStr for RecipeType {
    type Err = ParseRecipeTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(Self::Food),
            "drink" => Ok(Self::Drink),
            other => Err(ParseRecipeTypeError {
                value: other.to_owned(),
            }),
        }
    }
}

/// A single ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// What to add.
    pub name: String,
    /// How much of it, in `unit`.
    pub amount: f64,
    /// Unit of measure for `amount` ("cups", "g", "pinch").
    pub unit: String,
}

/// A stored recipe owned by exactly one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    /// Server-generated identifier.
    pub id: Uuid,
    /// Owner; never changes after creation.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Food or drink.
    pub recipe_type: RecipeType,
    /// Ingredient lines in author order.
    pub ingredients: Vec<Ingredient>,
    /// Method steps in author order.
    pub instructions: Vec<String>,
    /// When the recipe was saved.
    pub created_at: DateTime<Utc>,
    /// When the recipe last changed.
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Apply a partial update and advance `updated_at`.
    ///
    /// Fields absent from the patch keep their value. `id`, `user_id` and
    /// `created_at` never change.
    pub fn apply_patch(&mut self, patch: RecipePatch, clock: &dyn Clock) {
        let RecipePatch {
            name,
            recipe_type,
            ingredients,
            instructions,
        } = patch;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(recipe_type) = recipe_type {
            self.recipe_type = recipe_type;
        }
        if let Some(ingredients) = ingredients {
            self.ingredients = ingredients;
        }
        if let Some(instructions) = instructions {
            self.instructions = instructions;
        }
        self.updated_at = timestamps::refreshed(self.updated_at, clock);
    }
}

/// Validation failures for recipe payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeValidationError {
    /// The recipe name was blank.
    #[error("recipe name must not be blank")]
    BlankName,
    /// An ingredient name was blank.
    #[error("ingredient {index} name must not be blank")]
    BlankIngredientName {
        /// Position of the offending ingredient.
        index: usize,
    },
    /// An ingredient unit was blank.
    #[error("ingredient {index} unit must not be blank")]
    BlankIngredientUnit {
        /// Position of the offending ingredient.
        index: usize,
    },
    /// An ingredient amount was negative or not finite.
    #[error("ingredient {index} amount must be a finite, non-negative number")]
    InvalidIngredientAmount {
        /// Position of the offending ingredient.
        index: usize,
    },
}

impl RecipeValidationError {
    /// JSON field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::BlankName => "name",
            Self::BlankIngredientName { .. }
            | Self::BlankIngredientUnit { .. }
            | Self::InvalidIngredientAmount { .. } => "ingredients",
        }
    }

    /// Offending list position, for ingredient failures.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::BlankName => None,
            Self::BlankIngredientName { index }
            | Self::BlankIngredientUnit { index }
            | Self::InvalidIngredientAmount { index } => Some(*index),
        }
    }
}

fn validate_name(name: &str) -> Result<(), RecipeValidationError> {
    if name.trim().is_empty() {
        return Err(RecipeValidationError::BlankName);
    }
    Ok(())
}

fn validate_ingredients(ingredients: &[Ingredient]) -> Result<(), RecipeValidationError> {
    for (index, ingredient) in ingredients.iter().enumerate() {
        if ingredient.name.trim().is_empty() {
            return Err(RecipeValidationError::BlankIngredientName { index });
        }
        if ingredient.unit.trim().is_empty() {
            return Err(RecipeValidationError::BlankIngredientUnit { index });
        }
        if !ingredient.amount.is_finite() || ingredient.amount < 0.0 {
            return Err(RecipeValidationError::InvalidIngredientAmount { index });
        }
    }
    Ok(())
}

/// Everything needed to create a recipe; the store assigns id and stamps.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    /// Owner of the new recipe.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Food or drink.
    pub recipe_type: RecipeType,
    /// Ingredient lines.
    pub ingredients: Vec<Ingredient>,
    /// Method steps.
    pub instructions: Vec<String>,
}

impl RecipeDraft {
    /// Check the draft before it reaches a repository.
    pub fn validate(&self) -> Result<(), RecipeValidationError> {
        validate_name(&self.name)?;
        validate_ingredients(&self.ingredients)
    }

    /// Materialise the draft as a stored recipe.
    pub fn into_recipe(self, id: Uuid, clock: &dyn Clock) -> Recipe {
        let now = timestamps::now(clock);
        Recipe {
            id,
            user_id: self.user_id,
            name: self.name,
            recipe_type: self.recipe_type,
            ingredients: self.ingredients,
            instructions: self.instructions,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial recipe update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipePatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement type.
    pub recipe_type: Option<RecipeType>,
    /// Replacement ingredient list.
    pub ingredients: Option<Vec<Ingredient>>,
    /// Replacement method.
    pub instructions: Option<Vec<String>>,
}

impl RecipePatch {
    /// Check the supplied fields.
    pub fn validate(&self) -> Result<(), RecipeValidationError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(ingredients) = &self.ingredients {
            validate_ingredients(ingredients)?;
        }
        Ok(())
    }
}
