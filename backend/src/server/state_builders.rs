//! Builders wiring repositories and services into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use pantry::domain::ports::{
    GroceryListRepository, GroceryListService, RecipeRepository, RecipeService,
};
use pantry::domain::{GroceryListServiceImpl, RecipeServiceImpl};
use pantry::inbound::http::state::HttpState;
use pantry::outbound::memory::{InMemoryGroceryListRepository, InMemoryRecipeRepository};
use pantry::outbound::persistence::{DbPool, DieselGroceryListRepository, DieselRecipeRepository};

use super::ServerConfig;

fn services_from<R, G>(recipes: R, lists: G) -> (Arc<dyn RecipeService>, Arc<dyn GroceryListService>)
where
    R: RecipeRepository + 'static,
    G: GroceryListRepository + 'static,
{
    (
        Arc::new(RecipeServiceImpl::new(Arc::new(recipes))),
        Arc::new(GroceryListServiceImpl::new(Arc::new(lists))),
    )
}

fn durable_services(
    pool: &DbPool,
    clock: Arc<dyn Clock>,
) -> (Arc<dyn RecipeService>, Arc<dyn GroceryListService>) {
    services_from(
        DieselRecipeRepository::new(pool.clone(), Arc::clone(&clock)),
        DieselGroceryListRepository::new(pool.clone(), clock),
    )
}

fn memory_services(clock: Arc<dyn Clock>) -> (Arc<dyn RecipeService>, Arc<dyn GroceryListService>) {
    services_from(
        InMemoryRecipeRepository::new().with_clock(Arc::clone(&clock)),
        InMemoryGroceryListRepository::new().with_clock(clock),
    )
}

/// Build HTTP state, choosing Diesel repositories when a pool is configured
/// and process-local storage otherwise.
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let (recipes, grocery_lists) = match &config.db_pool {
        Some(pool) => durable_services(pool, clock),
        None => memory_services(clock),
    };
    web::Data::new(HttpState::new(
        recipes,
        grocery_lists,
        Arc::clone(&config.tokens),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    use pantry::domain::ports::{StubTokenVerifier, TokenVerifier};
    use pantry::test_support::{pancakes_draft, user};

    #[tokio::test]
    async fn memory_state_shares_storage_between_handler_clones() {
        let config = ServerConfig::new(
            SocketAddr::from(([127, 0, 0, 1], 0)),
            Arc::new(StubTokenVerifier::default()),
        );
        let state = build_http_state(&config);
        let clone = state.clone();

        let created = state
            .recipes
            .create(pancakes_draft(user("alice")))
            .await
            .expect("create succeeds");
        let listed = clone.recipes.list(&user("alice")).await.expect("list succeeds");
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn state_uses_configured_verifier() {
        let config = ServerConfig::new(
            SocketAddr::from(([127, 0, 0, 1], 0)),
            Arc::new(StubTokenVerifier::refusing()),
        );
        let state = build_http_state(&config);
        assert!(state.tokens.verify("anything").await.is_none());
    }
}
