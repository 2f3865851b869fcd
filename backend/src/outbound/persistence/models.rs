//! Internal Diesel row structs.
//!
//! Rows never leave the persistence layer; repositories convert them into
//! domain types and validate stored text on the way.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{grocery_items, grocery_lists, recipes};

/// Row read from `recipes`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub recipe_type: String,
    pub ingredients: serde_json::Value,
    pub instructions: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for `recipes`; `seq` comes from its sequence.
#[derive(Debug, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub id: Uuid,
    pub user_id: &'a str,
    pub name: &'a str,
    pub recipe_type: &'a str,
    pub ingredients: &'a serde_json::Value,
    pub instructions: &'a serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable `recipes` columns.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeChangeset<'a> {
    pub name: &'a str,
    pub recipe_type: &'a str,
    pub ingredients: &'a serde_json::Value,
    pub instructions: &'a serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

/// Row read from `grocery_lists`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = grocery_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GroceryListRow {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for `grocery_lists`.
#[derive(Debug, Insertable)]
#[diesel(table_name = grocery_lists)]
pub(crate) struct NewGroceryListRow<'a> {
    pub id: Uuid,
    pub user_id: &'a str,
    pub name: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable `grocery_lists` columns.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = grocery_lists)]
pub(crate) struct GroceryListChangeset<'a> {
    pub name: &'a str,
    pub updated_at: DateTime<Utc>,
}

/// Row read from `grocery_items`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = grocery_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GroceryItemRow {
    pub id: Uuid,
    pub list_id: Uuid,
    pub name: String,
    pub quantity: Option<String>,
    pub checked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for `grocery_items`.
#[derive(Debug, Insertable)]
#[diesel(table_name = grocery_items)]
pub(crate) struct NewGroceryItemRow<'a> {
    pub id: Uuid,
    pub list_id: Uuid,
    pub name: &'a str,
    pub quantity: Option<&'a str>,
    pub checked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable `grocery_items` columns. A cleared quantity is written as NULL.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = grocery_items)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct GroceryItemChangeset<'a> {
    pub name: &'a str,
    pub quantity: Option<&'a str>,
    pub checked: bool,
    pub updated_at: DateTime<Utc>,
}
