//! In-memory [`GroceryListRepository`].

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use uuid::Uuid;

use crate::domain::ownership::{OwnedLookup, guard_owned};
use crate::domain::ports::{GroceryListRepository, GroceryListRepositoryError};
use crate::domain::{
    GroceryItem, GroceryItemDraft, GroceryItemPatch, GroceryList, GroceryListDraft,
    GroceryListPatch, GroceryListSummary, UserId,
};

/// Grocery lists, each owning its items, held behind a lock.
///
/// Clones share the same storage.
#[derive(Clone)]
pub struct InMemoryGroceryListRepository {
    lists: Arc<RwLock<Vec<GroceryList>>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryGroceryListRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGroceryListRepository {
    /// Create an empty repository using the system clock.
    pub fn new() -> Self {
        Self {
            lists: Arc::default(),
            clock: Arc::new(DefaultClock),
        }
    }

    /// Replace the stored lists with `lists`.
    pub fn with_lists(self, lists: impl IntoIterator<Item = GroceryList>) -> Self {
        Self {
            lists: Arc::new(RwLock::new(lists.into_iter().collect())),
            ..self
        }
    }

    /// Stamp records with `clock` instead of the system clock.
    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self { clock, ..self }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<GroceryList>>, GroceryListRepositoryError> {
        self.lists
            .read()
            .map_err(|_| GroceryListRepositoryError::query("grocery list store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<GroceryList>>, GroceryListRepositoryError> {
        self.lists
            .write()
            .map_err(|_| GroceryListRepositoryError::query("grocery list store lock poisoned"))
    }

    /// Run `edit` on the stored list with `list_id`, if it still exists.
    fn edit_list<R>(
        &self,
        list_id: &Uuid,
        edit: impl FnOnce(&mut GroceryList) -> Option<R>,
    ) -> Result<Option<R>, GroceryListRepositoryError> {
        let mut lists = self.write()?;
        Ok(lists
            .iter_mut()
            .find(|list| list.id == *list_id)
            .and_then(edit))
    }
}

fn fresh_list_id(lists: &[GroceryList]) -> Uuid {
    loop {
        let id = Uuid::new_v4();
        if lists.iter().all(|list| list.id != id) {
            return id;
        }
    }
}

/// Item ids are unique across every list, matching the table's primary key.
fn item_id_taken(lists: &[GroceryList], id: &Uuid) -> bool {
    lists.iter().any(|list| list.item(id).is_some())
}

fn fresh_item_id(lists: &[GroceryList]) -> Uuid {
    loop {
        let id = Uuid::new_v4();
        if !item_id_taken(lists, &id) {
            return id;
        }
    }
}

#[async_trait]
impl OwnedLookup<GroceryList> for InMemoryGroceryListRepository {
    type Error = GroceryListRepositoryError;
    type Id = Uuid;

    async fn find_owned(
        &self,
        id: &Uuid,
        owner: &UserId,
    ) -> Result<Option<GroceryList>, GroceryListRepositoryError> {
        let lists = self.read()?;
        Ok(lists
            .iter()
            .find(|list| list.id == *id && list.user_id == *owner)
            .cloned())
    }
}

#[async_trait]
impl GroceryListRepository for InMemoryGroceryListRepository {
    async fn find_all(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<GroceryListSummary>, GroceryListRepositoryError> {
        let lists = self.read()?;
        Ok(lists
            .iter()
            .filter(|list| list.user_id == *user_id)
            .map(GroceryListSummary::from)
            .collect())
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<GroceryList>, GroceryListRepositoryError> {
        self.find_owned(id, user_id).await
    }

    async fn save(&self, draft: GroceryListDraft) -> Result<GroceryList, GroceryListRepositoryError> {
        let mut lists = self.write()?;
        let list = draft.into_list(fresh_list_id(&lists), self.clock.as_ref());
        lists.push(list.clone());
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
            self.edit_list(&list.id, |stored| {
                stored.name = list.name;
                stored.updated_at = list.updated_at;
                Some(stored.clone())
            })
        })
        .await
    }

    async fn delete_by_id(
        &self,
        id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<GroceryList>, GroceryListRepositoryError> {
        guard_owned(self, id, user_id, move |list: GroceryList| async move {
            let mut lists = self.write()?;
            Ok(lists
                .iter()
                .position(|stored| stored.id == list.id)
                .map(|index| lists.remove(index)))
        })
        .await
    }

    async fn add_item(
        &self,
        list_id: &Uuid,
        user_id: &UserId,
        draft: GroceryItemDraft,
    ) -> Result<Option<GroceryItem>, GroceryListRepositoryError> {
        guard_owned(self, list_id, user_id, move |list: GroceryList| async move {
            let mut lists = self.write()?;
            let item_id = fresh_item_id(&lists);
            let Some(stored) = lists.iter_mut().find(|stored| stored.id == list.id) else {
                return Ok(None);
            };
            let item = draft.into_item(stored.id, item_id, self.clock.as_ref());
            stored.items.push(item.clone());
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
        guard_owned(self, list_id, user_id, move |list: GroceryList| async move {
            self.edit_list(&list.id, |stored| {
                let item = stored.items.iter_mut().find(|item| item.id == *item_id)?;
                item.apply_patch(patch, self.clock.as_ref());
                Some(item.clone())
            })
        })
        .await
    }

    async fn delete_item(
        &self,
        list_id: &Uuid,
        item_id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<GroceryItem>, GroceryListRepositoryError> {
        guard_owned(self, list_id, user_id, move |list: GroceryList| async move {
            self.edit_list(&list.id, |stored| {
                let index = stored.items.iter().position(|item| item.id == *item_id)?;
                Some(stored.items.remove(index))
            })
        })
        .await
    }
}

#[cfg(test)]
#[path = "grocery_list_repository_tests.rs"]
mod tests;
