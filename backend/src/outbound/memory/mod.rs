//! In-memory repository adapters.
//!
//! Used when no database is configured and as the backing store for tests.
//! Behaviour matches the Diesel adapters: owner scoping, insertion order,
//! patch semantics and stamps all come from the same domain code.

mod grocery_list_repository;
mod recipe_repository;

pub use grocery_list_repository::InMemoryGroceryListRepository;
pub use recipe_repository::InMemoryRecipeRepository;
