//! Domain entities, services and ports.
//!
//! Purpose: hold the owner-scoped recipe and grocery-list model independent of
//! HTTP and storage. Inbound adapters call the driving ports in [`ports`];
//! outbound adapters implement the driven ones.
//!
//! Public surface:
//! - `Error` / `ErrorCode` — transport-agnostic error payload.
//! - `UserId` — opaque owner identity.
//! - `Recipe`, `GroceryList`, `GroceryItem` and their drafts and patches.
//! - `RecipeServiceImpl`, `GroceryListServiceImpl` — driving port
//!   implementations.

pub mod error;
pub mod grocery;
pub mod grocery_list_service;
pub mod ownership;
pub mod patch;
pub mod ports;
pub mod recipe;
pub mod recipe_service;
pub mod timestamps;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::grocery::{
    GroceryItem, GroceryItemDraft, GroceryItemPatch, GroceryList, GroceryListDraft,
    GroceryListPatch, GroceryListSummary, GroceryValidationError,
};
pub use self::grocery_list_service::GroceryListServiceImpl;
pub use self::patch::Patch;
pub use self::recipe::{
    Ingredient, ParseRecipeTypeError, Recipe, RecipeDraft, RecipePatch, RecipeType,
    RecipeValidationError,
};
pub use self::recipe_service::RecipeServiceImpl;
pub use self::trace_id::TraceId;
pub use self::user::{USER_ID_MAX, UserId, UserIdValidationError};
