//! Shared helpers for the HTTP integration suites.
//!
//! Each suite builds the public `/api/v1` surface over in-memory storage and a
//! token table with two users, then drives it through `actix_web::test`.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use pantry::Trace;
use pantry::domain::{GroceryListServiceImpl, RecipeServiceImpl};
use pantry::inbound::http::configure_api;
use pantry::inbound::http::health::{HealthState, live, ready};
use pantry::inbound::http::state::HttpState;
use pantry::outbound::memory::{InMemoryGroceryListRepository, InMemoryRecipeRepository};
use pantry::test_support::{TokenTable, user};

/// Bearer token resolving to `user-1`.
pub const USER_1: &str = "token-user-1";
/// Bearer token resolving to `user-2`.
pub const USER_2: &str = "token-user-2";

/// HTTP state over fresh in-memory repositories.
pub fn memory_state() -> web::Data<HttpState> {
    let tokens = TokenTable::default()
        .with_token(USER_1, user("user-1"))
        .with_token(USER_2, user("user-2"));
    web::Data::new(HttpState::new(
        Arc::new(RecipeServiceImpl::new(Arc::new(InMemoryRecipeRepository::new()))),
        Arc::new(GroceryListServiceImpl::new(Arc::new(
            InMemoryGroceryListRepository::new(),
        ))),
        Arc::new(tokens),
    ))
}

/// Initialise the full application, as the server wires it.
pub async fn init_app(
    state: web::Data<HttpState>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    test::init_service(
        App::new()
            .app_data(health)
            .app_data(state)
            .wrap(Trace)
            .configure(configure_api)
            .service(ready)
            .service(live),
    )
    .await
}

/// Attach a bearer token to a request builder.
pub fn authorised(request: test::TestRequest, token: &str) -> test::TestRequest {
    request.insert_header(("Authorization", format!("Bearer {token}")))
}
