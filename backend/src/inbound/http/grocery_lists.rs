//! Grocery list and item HTTP handlers.
//!
//! ```text
//! POST   /api/v1/grocery-lists
//! GET    /api/v1/grocery-lists
//! GET    /api/v1/grocery-lists/{id}
//! PUT    /api/v1/grocery-lists/{id}
//! DELETE /api/v1/grocery-lists/{id}
//! POST   /api/v1/grocery-lists/{listId}/items
//! PUT    /api/v1/grocery-lists/{listId}/items/{id}
//! DELETE /api/v1/grocery-lists/{listId}/items/{id}
//! ```

use actix_web::{delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    GroceryItem, GroceryItemDraft, GroceryItemPatch, GroceryList, GroceryListDraft,
    GroceryListPatch, GroceryListSummary, Patch,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_path_id;

/// Request payload for creating a list.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroceryListRequestBody {
    /// Display name.
    #[schema(example = "Weekly Shopping")]
    pub name: String,
}

/// Request payload for renaming a list.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroceryListRequestBody {
    /// Replacement name.
    pub name: Option<String>,
}

/// Request payload for adding an item.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroceryItemRequestBody {
    /// What to buy.
    #[schema(example = "Milk")]
    pub name: String,
    /// Free-form amount.
    #[schema(example = "1 gallon")]
    pub quantity: Option<String>,
}

/// Request payload for changing an item.
///
/// `quantity` distinguishes an omitted key (keep) from `null` (clear).
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroceryItemRequestBody {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement quantity, or `null` to remove it.
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    #[schema(value_type = Option<String>)]
    pub quantity: Patch<String>,
    /// Replacement checked flag.
    pub checked: Option<bool>,
}

/// Grocery item as returned to the list owner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItemResponseBody {
    /// Server-generated identifier.
    pub id: Uuid,
    /// The list holding the item.
    pub list_id: Uuid,
    /// What to buy.
    pub name: String,
    /// Free-form amount, when given.
    pub quantity: Option<String>,
    /// Whether the item has been picked up.
    pub checked: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl From<GroceryItem> for GroceryItemResponseBody {
    fn from(value: GroceryItem) -> Self {
        Self {
            id: value.id,
            list_id: value.list_id,
            name: value.name,
            quantity: value.quantity,
            checked: value.checked,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Grocery list with its items.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroceryListResponseBody {
    /// Server-generated identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Items in insertion order.
    pub items: Vec<GroceryItemResponseBody>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last rename time.
    pub updated_at: DateTime<Utc>,
}

impl From<GroceryList> for GroceryListResponseBody {
    fn from(value: GroceryList) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id.into(),
            name: value.name,
            items: value.items.into_iter().map(Into::into).collect(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Grocery list without its items, as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroceryListSummaryResponseBody {
    /// Server-generated identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last rename time.
    pub updated_at: DateTime<Utc>,
}

impl From<GroceryListSummary> for GroceryListSummaryResponseBody {
    fn from(value: GroceryListSummary) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id.into(),
            name: value.name,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Create an empty list owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/grocery-lists",
    request_body = CreateGroceryListRequestBody,
    responses(
        (status = 200, description = "List stored", body = GroceryListResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["grocery-lists"],
    operation_id = "createGroceryList"
)]
#[post("/grocery-lists")]
pub async fn create_grocery_list(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateGroceryListRequestBody>,
) -> ApiResult<web::Json<GroceryListResponseBody>> {
    let draft = GroceryListDraft {
        user_id: user.into_inner(),
        name: payload.into_inner().name,
    };
    let list = state.grocery_lists.create(draft).await?;
    Ok(web::Json(list.into()))
}

/// List summaries of the caller's grocery lists.
#[utoipa::path(
    get,
    path = "/api/v1/grocery-lists",
    responses(
        (status = 200, description = "Lists owned by the caller", body = [GroceryListSummaryResponseBody]),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["grocery-lists"],
    operation_id = "listGroceryLists"
)]
#[get("/grocery-lists")]
pub async fn list_grocery_lists(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<GroceryListSummaryResponseBody>>> {
    let lists = state.grocery_lists.list(user.user_id()).await?;
    Ok(web::Json(lists.into_iter().map(Into::into).collect()))
}

/// Fetch one of the caller's lists with its items.
#[utoipa::path(
    get,
    path = "/api/v1/grocery-lists/{id}",
    params(("id" = String, Path, description = "List id")),
    responses(
        (status = 200, description = "The list, or null when not found",
            body = Option<GroceryListResponseBody>),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["grocery-lists"],
    operation_id = "getGroceryList"
)]
#[get("/grocery-lists/{id}")]
pub async fn get_grocery_list(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<GroceryListResponseBody>>> {
    let Some(id) = parse_path_id(&path) else {
        return Ok(web::Json(None));
    };
    let list = state.grocery_lists.get(&id, user.user_id()).await?;
    Ok(web::Json(list.map(Into::into)))
}

/// Rename one of the caller's lists.
#[utoipa::path(
    put,
    path = "/api/v1/grocery-lists/{id}",
    params(("id" = String, Path, description = "List id")),
    request_body = UpdateGroceryListRequestBody,
    responses(
        (status = 200, description = "Updated list, or null when not found",
            body = Option<GroceryListResponseBody>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["grocery-lists"],
    operation_id = "updateGroceryList"
)]
#[put("/grocery-lists/{id}")]
pub async fn update_grocery_list(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateGroceryListRequestBody>,
) -> ApiResult<web::Json<Option<GroceryListResponseBody>>> {
    let Some(id) = parse_path_id(&path) else {
        return Ok(web::Json(None));
    };
    let patch = GroceryListPatch {
        name: payload.into_inner().name,
    };
    let list = state
        .grocery_lists
        .update(&id, user.user_id(), patch)
        .await?;
    Ok(web::Json(list.map(Into::into)))
}

/// Delete one of the caller's lists together with its items.
#[utoipa::path(
    delete,
    path = "/api/v1/grocery-lists/{id}",
    params(("id" = String, Path, description = "List id")),
    responses(
        (status = 200, description = "Deleted list with the items it held, or null",
            body = Option<GroceryListResponseBody>),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["grocery-lists"],
    operation_id = "deleteGroceryList"
)]
#[delete("/grocery-lists/{id}")]
pub async fn delete_grocery_list(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<GroceryListResponseBody>>> {
    let Some(id) = parse_path_id(&path) else {
        return Ok(web::Json(None));
    };
    let list = state.grocery_lists.delete(&id, user.user_id()).await?;
    Ok(web::Json(list.map(Into::into)))
}

/// Append an item to one of the caller's lists.
#[utoipa::path(
    post,
    path = "/api/v1/grocery-lists/{listId}/items",
    params(("listId" = String, Path, description = "List id")),
    request_body = CreateGroceryItemRequestBody,
    responses(
        (status = 200, description = "New unchecked item, or null when the list is not found",
            body = Option<GroceryItemResponseBody>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["grocery-lists"],
    operation_id = "addGroceryItem"
)]
#[post("/grocery-lists/{listId}/items")]
pub async fn add_grocery_item(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<CreateGroceryItemRequestBody>,
) -> ApiResult<web::Json<Option<GroceryItemResponseBody>>> {
    let Some(list_id) = parse_path_id(&path) else {
        return Ok(web::Json(None));
    };
    let body = payload.into_inner();
    let draft = GroceryItemDraft {
        name: body.name,
        quantity: body.quantity,
    };
    let item = state
        .grocery_lists
        .add_item(&list_id, user.user_id(), draft)
        .await?;
    Ok(web::Json(item.map(Into::into)))
}

fn parse_item_path(path: &(String, String)) -> Option<(Uuid, Uuid)> {
    Some((parse_path_id(&path.0)?, parse_path_id(&path.1)?))
}

/// Change an item on one of the caller's lists.
#[utoipa::path(
    put,
    path = "/api/v1/grocery-lists/{listId}/items/{id}",
    params(
        ("listId" = String, Path, description = "List id"),
        ("id" = String, Path, description = "Item id")
    ),
    request_body = UpdateGroceryItemRequestBody,
    responses(
        (status = 200, description = "Updated item, or null when not found",
            body = Option<GroceryItemResponseBody>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["grocery-lists"],
    operation_id = "updateGroceryItem"
)]
#[put("/grocery-lists/{listId}/items/{id}")]
pub async fn update_grocery_item(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
    payload: web::Json<UpdateGroceryItemRequestBody>,
) -> ApiResult<web::Json<Option<GroceryItemResponseBody>>> {
    let Some((list_id, item_id)) = parse_item_path(&path) else {
        return Ok(web::Json(None));
    };
    let body = payload.into_inner();
    let patch = GroceryItemPatch {
        name: body.name,
        quantity: body.quantity,
        checked: body.checked,
    };
    let item = state
        .grocery_lists
        .update_item(&list_id, &item_id, user.user_id(), patch)
        .await?;
    Ok(web::Json(item.map(Into::into)))
}

/// Remove an item from one of the caller's lists.
#[utoipa::path(
    delete,
    path = "/api/v1/grocery-lists/{listId}/items/{id}",
    params(
        ("listId" = String, Path, description = "List id"),
        ("id" = String, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Removed item, or null when not found",
            body = Option<GroceryItemResponseBody>),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["grocery-lists"],
    operation_id = "deleteGroceryItem"
)]
#[delete("/grocery-lists/{listId}/items/{id}")]
pub async fn delete_grocery_item(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<Option<GroceryItemResponseBody>>> {
    let Some((list_id, item_id)) = parse_item_path(&path) else {
        return Ok(web::Json(None));
    };
    let item = state
        .grocery_lists
        .delete_item(&list_id, &item_id, user.user_id())
        .await?;
    Ok(web::Json(item.map(Into::into)))
}

#[cfg(test)]
#[path = "grocery_lists_tests.rs"]
mod tests;
