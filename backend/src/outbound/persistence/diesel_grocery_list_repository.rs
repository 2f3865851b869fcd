//! PostgreSQL-backed [`GroceryListRepository`] using Diesel.
//!
//! Lists and items live in separate tables; deleting a list cascades to its
//! items in the database. Item operations check list ownership first and then
//! scope the item query to that list.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ownership::{OwnedLookup, guard_owned};
use crate::domain::ports::{GroceryListRepository, GroceryListRepositoryError};
use crate::domain::{
    GroceryItem, GroceryItemDraft, GroceryItemPatch, GroceryList, GroceryListDraft,
    GroceryListPatch, GroceryListSummary, UserId,
};

use super::diesel_error_mapping::{map_diesel_error_with, map_pool_error_with};
use super::models::{
    GroceryItemChangeset, GroceryItemRow, GroceryListChangeset, GroceryListRow,
    NewGroceryItemRow, NewGroceryListRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{grocery_items, grocery_lists};

/// Diesel-backed implementation of the grocery list repository port.
#[derive(Clone)]
pub struct DieselGroceryListRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselGroceryListRepository {
    /// Create a repository over `pool`, stamping records with `clock`.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    async fn find_owned_row(
        &self,
        id: &Uuid,
        owner: &UserId,
    ) -> Result<Option<GroceryListRow>, GroceryListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        grocery_lists::table
            .filter(grocery_lists::id.eq(id))
            .filter(grocery_lists::user_id.eq(owner.as_str()))
            .select(GroceryListRow::as_select())
            .first::<GroceryListRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)
    }

    async fn load_items(&self, list_id: &Uuid) -> Result<Vec<GroceryItem>, GroceryListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<GroceryItemRow> = grocery_items::table
            .filter(grocery_items::list_id.eq(list_id))
            .order(grocery_items::seq.asc())
            .select(GroceryItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_item).collect())
    }

    async fn find_item(
        &self,
        list_id: &Uuid,
        item_id: &Uuid,
    ) -> Result<Option<GroceryItem>, GroceryListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = grocery_items::table
            .filter(grocery_items::id.eq(item_id))
            .filter(grocery_items::list_id.eq(list_id))
            .select(GroceryItemRow::as_select())
            .first::<GroceryItemRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_item))
    }
}

fn map_pool_error(error: PoolError) -> GroceryListRepositoryError {
    map_pool_error_with(error, GroceryListRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> GroceryListRepositoryError {
    map_diesel_error_with(
        error,
        GroceryListRepositoryError::query,
        GroceryListRepositoryError::connection,
    )
}

pub(crate) fn row_to_summary(
    row: GroceryListRow,
) -> Result<GroceryListSummary, GroceryListRepositoryError> {
    let GroceryListRow {
        id,
        user_id,
        name,
        created_at,
        updated_at,
    } = row;
    let user_id = UserId::new(user_id).map_err(|err| {
        GroceryListRepositoryError::query(format!("grocery list {id} owner: {err}"))
    })?;
    Ok(GroceryListSummary {
        id,
        user_id,
        name,
        created_at,
        updated_at,
    })
}

pub(crate) fn row_to_item(row: GroceryItemRow) -> GroceryItem {
    GroceryItem {
        id: row.id,
        list_id: row.list_id,
        name: row.name,
        quantity: row.quantity,
        checked: row.checked,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn with_items(summary: GroceryListSummary, items: Vec<GroceryItem>) -> GroceryList {
    GroceryList {
        id: summary.id,
        user_id: summary.user_id,
        name: summary.name,
        items,
        created_at: summary.created_at,
        updated_at: summary.updated_at,
    }
}

#[async_trait]
impl OwnedLookup<GroceryListSummary> for DieselGroceryListRepository {
    type Error = GroceryListRepositoryError;
    type Id = Uuid;

    async fn find_owned(
        &self,
        id: &Uuid,
        owner: &UserId,
    ) -> Result<Option<GroceryListSummary>, GroceryListRepositoryError> {
        self.find_owned_row(id, owner)
            .await?
            .map(row_to_summary)
            .transpose()
    }
}

#[async_trait]
impl OwnedLookup<GroceryList> for DieselGroceryListRepository {
    type Error = GroceryListRepositoryError;
    type Id = Uuid;

    async fn find_owned(
        &self,
        id: &Uuid,
        owner: &UserId,
    ) -> Result<Option<GroceryList>, GroceryListRepositoryError> {
        let Some(row) = self.find_owned_row(id, owner).await? else {
            return Ok(None);
        };
        let summary = row_to_summary(row)?;
        let items = self.load_items(&summary.id).await?;
        Ok(Some(with_items(summary, items)))
    }
}

#[async_trait]
impl GroceryListRepository for DieselGroceryListRepository {
    async fn find_all(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<GroceryListSummary>, GroceryListRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<GroceryListRow> = grocery_lists::table
            .filter(grocery_lists::user_id.eq(user_id.as_str()))
            .order(grocery_lists::seq.asc())
            .select(GroceryListRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_summary).collect()
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<GroceryList>, GroceryListRepositoryError> {
        OwnedLookup::<GroceryList>::find_owned(self, id, user_id).await
    }

    async fn save(&self, draft: GroceryListDraft) -> Result<GroceryList, GroceryListRepositoryError> {
        let list = draft.into_list(Uuid::new_v4(), self.clock.as_ref());
        let new_row = NewGroceryListRow {
            id: list.id,
            user_id: list.user_id.as_str(),
            name: &list.name,
            created_at: list.created_at,
            updated_at: list.updated_at,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(grocery_lists::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(list)
    }

    async fn update(
        &self,
        id: &Uuid,
        user_id: &UserId,
        patch: GroceryListPatch,
    ) -> Result<Option<GroceryList>, GroceryListRepositoryError> {
        guard_owned(self, id, user_id, move |mut list: GroceryList| async move {
            list.apply_patch(patch, self.clock.as_ref());
            let changes = GroceryListChangeset {
                name: &list.name,
                updated_at: list.updated_at,
            };

            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let touched = diesel::update(
                grocery_lists::table
                    .filter(grocery_lists::id.eq(list.id))
                    .filter(grocery_lists::user_id.eq(list.user_id.as_str())),
            )
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
            Ok((touched > 0).then_some(list))
        })
        .await
    }

    async fn delete_by_id(
        &self,
        id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<GroceryList>, GroceryListRepositoryError> {
        guard_owned(self, id, user_id, move |list: GroceryList| async move {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let removed = diesel::delete(
                grocery_lists::table
                    .filter(grocery_lists::id.eq(list.id))
                    .filter(grocery_lists::user_id.eq(list.user_id.as_str())),
            )
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
            Ok((removed > 0).then_some(list))
        })
        .await
    }

    async fn add_item(
        &self,
        list_id: &Uuid,
        user_id: &UserId,
        draft: GroceryItemDraft,
    ) -> Result<Option<GroceryItem>, GroceryListRepositoryError> {
        guard_owned(self, list_id, user_id, move |list: GroceryListSummary| async move {
            let item = draft.into_item(list.id, Uuid::new_v4(), self.clock.as_ref());
            let new_row = NewGroceryItemRow {
                id: item.id,
                list_id: item.list_id,
                name: &item.name,
                quantity: item.quantity.as_deref(),
                checked: item.checked,
                created_at: item.created_at,
                updated_at: item.updated_at,
            };

            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            diesel::insert_into(grocery_items::table)
                .values(&new_row)
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
            Ok(Some(item))
        })
        .await
    }

    async fn update_item(
        &self,
        list_id: &Uuid,
        item_id: &Uuid,
        user_id: &UserId,
        patch: GroceryItemPatch,
    ) -> Result<Option<GroceryItem>, GroceryListRepositoryError> {
        guard_owned(self, list_id, user_id, move |list: GroceryListSummary| async move {
            let Some(mut item) = self.find_item(&list.id, item_id).await? else {
                return Ok(None);
            };
            item.apply_patch(patch, self.clock.as_ref());
            let changes = GroceryItemChangeset {
                name: &item.name,
                quantity: item.quantity.as_deref(),
                checked: item.checked,
                updated_at: item.updated_at,
            };

            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let touched = diesel::update(
                grocery_items::table
                    .filter(grocery_items::id.eq(item.id))
                    .filter(grocery_items::list_id.eq(list.id)),
            )
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
            Ok((touched > 0).then_some(item))
        })
        .await
    }

    async fn delete_item(
        &self,
        list_id: &Uuid,
        item_id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<GroceryItem>, GroceryListRepositoryError> {
        guard_owned(self, list_id, user_id, move |list: GroceryListSummary| async move {
            let Some(item) = self.find_item(&list.id, item_id).await? else {
                return Ok(None);
            };

            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let removed = diesel::delete(
                grocery_items::table
                    .filter(grocery_items::id.eq(item.id))
                    .filter(grocery_items::list_id.eq(list.id)),
            )
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
            Ok((removed > 0).then_some(item))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn stamp() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0)
            .single()
            .expect("valid instant")
    }

    #[rstest]
    fn summary_rows_validate_owner() {
        let row = GroceryListRow {
            id: Uuid::new_v4(),
            user_id: " alice".to_owned(),
            name: "Weekly".to_owned(),
            created_at: stamp(),
            updated_at: stamp(),
        };
        let err = row_to_summary(row).expect_err("padded owner");
        assert!(matches!(err, GroceryListRepositoryError::Query { .. }));
    }

    #[rstest]
    fn item_rows_keep_absent_quantity() {
        let row = GroceryItemRow {
            id: Uuid::new_v4(),
            list_id: Uuid::new_v4(),
            name: "Milk".to_owned(),
            quantity: None,
            checked: false,
            created_at: stamp(),
            updated_at: stamp(),
        };
        let item = row_to_item(row.clone());
        assert_eq!(item.quantity, None);
        assert_eq!(item.list_id, row.list_id);
    }

    #[rstest]
    fn with_items_keeps_metadata() {
        let summary = GroceryListSummary {
            id: Uuid::new_v4(),
            user_id: UserId::new("alice").expect("valid id"),
            name: "Weekly".to_owned(),
            created_at: stamp(),
            updated_at: stamp(),
        };
        let list = with_items(summary.clone(), Vec::new());
        assert_eq!(GroceryListSummary::from(&list), summary);
    }
}
