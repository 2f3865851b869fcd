//! Helpers for handler tests that drive the full `/api/v1` scope.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::{App, test, web};

use crate::domain::ports::{GroceryListService, RecipeService, TokenVerifier};
use crate::domain::{GroceryListServiceImpl, RecipeServiceImpl};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryGroceryListRepository, InMemoryRecipeRepository};
use crate::test_support::{TokenTable, user};

pub(crate) const ALICE_TOKEN: &str = "alice-token";
pub(crate) const BOB_TOKEN: &str = "bob-token";

/// Tokens for two users, `alice` and `bob`.
pub(crate) fn two_user_tokens() -> Arc<dyn TokenVerifier> {
    Arc::new(
        TokenTable::default()
            .with_token(ALICE_TOKEN, user("alice"))
            .with_token(BOB_TOKEN, user("bob")),
    )
}

/// State backed by fresh in-memory repositories.
pub(crate) fn memory_state() -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(RecipeServiceImpl::new(Arc::new(InMemoryRecipeRepository::new()))),
        Arc::new(GroceryListServiceImpl::new(Arc::new(
            InMemoryGroceryListRepository::new(),
        ))),
        two_user_tokens(),
    ))
}

/// State with the given services, for mock-driven failure tests.
pub(crate) fn state_with(
    recipes: Arc<dyn RecipeService>,
    grocery_lists: Arc<dyn GroceryListService>,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(recipes, grocery_lists, two_user_tokens()))
}

/// Send `request` with `token` through an app sharing `state`.
pub(crate) async fn send(
    state: &web::Data<HttpState>,
    request: test::TestRequest,
    token: &str,
) -> ServiceResponse {
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure_api)).await;
    let request = request
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    test::call_service(&app, request).await
}
