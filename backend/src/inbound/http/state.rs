//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{GroceryListService, RecipeService, TokenVerifier};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Recipe use cases.
    pub recipes: Arc<dyn RecipeService>,
    /// Grocery list and item use cases.
    pub grocery_lists: Arc<dyn GroceryListService>,
    /// Resolves bearer tokens for the authentication extractor.
    pub tokens: Arc<dyn TokenVerifier>,
}

impl HttpState {
    /// Construct state from its ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use pantry::domain::ports::StubTokenVerifier;
    /// use pantry::domain::{GroceryListServiceImpl, RecipeServiceImpl};
    /// use pantry::inbound::http::state::HttpState;
    /// use pantry::outbound::memory::{InMemoryGroceryListRepository, InMemoryRecipeRepository};
    ///
    /// let state = HttpState::new(
    ///     Arc::new(RecipeServiceImpl::new(Arc::new(InMemoryRecipeRepository::new()))),
    ///     Arc::new(GroceryListServiceImpl::new(Arc::new(
    ///         InMemoryGroceryListRepository::new(),
    ///     ))),
    ///     Arc::new(StubTokenVerifier::default()),
    /// );
    /// let _ = state.recipes.clone();
    /// ```
    pub fn new(
        recipes: Arc<dyn RecipeService>,
        grocery_lists: Arc<dyn GroceryListService>,
        tokens: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            recipes,
            grocery_lists,
            tokens,
        }
    }
}
