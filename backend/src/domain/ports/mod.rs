//! Ports at the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`TokenVerifier`]) are implemented by
//! outbound adapters. Driving ports (`*Service`) are what inbound adapters
//! call; the domain services implement them.

mod macros;
pub(crate) use macros::define_port_error;

mod grocery_list_repository;
mod grocery_list_service;
mod recipe_repository;
mod recipe_service;
mod token_verifier;

#[cfg(test)]
pub use grocery_list_repository::MockGroceryListRepository;
pub use grocery_list_repository::{GroceryListRepository, GroceryListRepositoryError};
#[cfg(test)]
pub use grocery_list_service::MockGroceryListService;
pub use grocery_list_service::GroceryListService;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipeRepository, RecipeRepositoryError};
#[cfg(test)]
pub use recipe_service::MockRecipeService;
pub use recipe_service::RecipeService;
#[cfg(test)]
pub use token_verifier::MockTokenVerifier;
pub use token_verifier::{DEFAULT_STUB_USER_ID, StubTokenVerifier, TokenVerifier};
