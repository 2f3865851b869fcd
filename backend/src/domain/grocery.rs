//! Grocery lists and the items on them.

use chrono::{DateTime, Utc};
use mockable::Clock;
use uuid::Uuid;

use super::timestamps;
use super::{Patch, UserId};

/// A single line on a grocery list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryItem {
    /// Server-generated identifier.
    pub id: Uuid,
    /// Owning list.
    pub list_id: Uuid,
    /// What to buy.
    pub name: String,
    /// Free-form amount such as "2" or "1 dozen"; absent when unspecified.
    pub quantity: Option<String>,
    /// Whether the item has been picked up.
    pub checked: bool,
    /// When the item was added.
    pub created_at: DateTime<Utc>,
    /// When the item last changed.
    pub updated_at: DateTime<Utc>,
}

impl GroceryItem {
    /// Apply a partial update and advance `updated_at`.
    pub fn apply_patch(&mut self, patch: GroceryItemPatch, clock: &dyn Clock) {
        let GroceryItemPatch {
            name,
            quantity,
            checked,
        } = patch;
        if let Some(name) = name {
            self.name = name;
        }
        quantity.apply_to(&mut self.quantity);
        if let Some(checked) = checked {
            self.checked = checked;
        }
        self.updated_at = timestamps::refreshed(self.updated_at, clock);
    }
}

/// A grocery list with its items in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryList {
    /// Server-generated identifier.
    pub id: Uuid,
    /// Owner; never changes after creation.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Items in the order they were added.
    pub items: Vec<GroceryItem>,
    /// When the list was saved.
    pub created_at: DateTime<Utc>,
    /// When the list itself last changed.
    pub updated_at: DateTime<Utc>,
}

impl GroceryList {
    /// Apply a partial update and advance `updated_at`.
    ///
    /// Item changes never go through here, so they leave the list stamp alone.
    pub fn apply_patch(&mut self, patch: GroceryListPatch, clock: &dyn Clock) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        self.updated_at = timestamps::refreshed(self.updated_at, clock);
    }

    /// Borrow an item by identifier.
    pub fn item(&self, item_id: &Uuid) -> Option<&GroceryItem> {
        self.items.iter().find(|item| item.id == *item_id)
    }
}

/// List metadata without items, as returned when listing a user's lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryListSummary {
    /// List identifier.
    pub id: Uuid,
    /// Owner.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// When the list was saved.
    pub created_at: DateTime<Utc>,
    /// When the list itself last changed.
    pub updated_at: DateTime<Utc>,
}

impl From<&GroceryList> for GroceryListSummary {
    fn from(list: &GroceryList) -> Self {
        Self {
            id: list.id,
            user_id: list.user_id.clone(),
            name: list.name.clone(),
            created_at: list.created_at,
            updated_at: list.updated_at,
        }
    }
}

/// Validation failures for grocery payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroceryValidationError {
    /// The list name was blank.
    #[error("grocery list name must not be blank")]
    BlankListName,
    /// The item name was blank.
    #[error("grocery item name must not be blank")]
    BlankItemName,
}

impl GroceryValidationError {
    /// JSON field the failure refers to.
    pub fn field(&self) -> &'static str {
        "name"
    }
}

/// Everything needed to create a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryListDraft {
    /// Owner of the new list.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
}

impl GroceryListDraft {
    /// Check the draft before it reaches a repository.
    pub fn validate(&self) -> Result<(), GroceryValidationError> {
        if self.name.trim().is_empty() {
            return Err(GroceryValidationError::BlankListName);
        }
        Ok(())
    }

    /// Materialise the draft as an empty stored list.
    pub fn into_list(self, id: Uuid, clock: &dyn Clock) -> GroceryList {
        let now = timestamps::now(clock);
        GroceryList {
            id,
            user_id: self.user_id,
            name: self.name,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial list update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroceryListPatch {
    /// Replacement name.
    pub name: Option<String>,
}

impl GroceryListPatch {
    /// Check the supplied fields.
    pub fn validate(&self) -> Result<(), GroceryValidationError> {
        match &self.name {
            Some(name) if name.trim().is_empty() => Err(GroceryValidationError::BlankListName),
            _ => Ok(()),
        }
    }
}

/// Everything needed to add an item to a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryItemDraft {
    /// What to buy.
    pub name: String,
    /// Optional free-form amount.
    pub quantity: Option<String>,
}

impl GroceryItemDraft {
    /// Check the draft before it reaches a repository.
    pub fn validate(&self) -> Result<(), GroceryValidationError> {
        if self.name.trim().is_empty() {
            return Err(GroceryValidationError::BlankItemName);
        }
        Ok(())
    }

    /// Materialise the draft as an unchecked item on `list_id`.
    pub fn into_item(self, list_id: Uuid, id: Uuid, clock: &dyn Clock) -> GroceryItem {
        let now = timestamps::now(clock);
        GroceryItem {
            id,
            list_id,
            name: self.name,
            quantity: self.quantity,
            checked: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial item update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroceryItemPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Quantity change; [`Patch::Clear`] removes it.
    pub quantity: Patch<String>,
    /// Replacement checked flag.
    pub checked: Option<bool>,
}

impl GroceryItemPatch {
    /// Check the supplied fields.
    pub fn validate(&self) -> Result<(), GroceryValidationError> {
        match &self.name {
            Some(name) if name.trim().is_empty() => Err(GroceryValidationError::BlankItemName),
            _ => Ok(()),
        }
    }
}
