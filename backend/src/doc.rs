//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the request and response bodies,
//! the error schema wrappers from [`crate::inbound::http::schemas`] and the
//! bearer-token security scheme. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use crate::inbound::http::grocery_lists::{
    CreateGroceryItemRequestBody, CreateGroceryListRequestBody, GroceryItemResponseBody,
    GroceryListResponseBody, GroceryListSummaryResponseBody, UpdateGroceryItemRequestBody,
    UpdateGroceryListRequestBody,
};
use crate::inbound::http::health::ProbeBody;
use crate::inbound::http::recipes::{
    CreateRecipeRequestBody, IngredientBody, RecipeResponseBody, UpdateRecipeRequestBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme in the document.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some(
                        "Access token issued by the identity provider; verified by introspection.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Pantry API",
        description = "Recipes and grocery lists, each visible only to the user who created them."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::grocery_lists::create_grocery_list,
        crate::inbound::http::grocery_lists::list_grocery_lists,
        crate::inbound::http::grocery_lists::get_grocery_list,
        crate::inbound::http::grocery_lists::update_grocery_list,
        crate::inbound::http::grocery_lists::delete_grocery_list,
        crate::inbound::http::grocery_lists::add_grocery_item,
        crate::inbound::http::grocery_lists::update_grocery_item,
        crate::inbound::http::grocery_lists::delete_grocery_item,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ProbeBody,
        IngredientBody,
        CreateRecipeRequestBody,
        UpdateRecipeRequestBody,
        RecipeResponseBody,
        CreateGroceryListRequestBody,
        UpdateGroceryListRequestBody,
        GroceryListResponseBody,
        GroceryListSummaryResponseBody,
        CreateGroceryItemRequestBody,
        UpdateGroceryItemRequestBody,
        GroceryItemResponseBody,
    )),
    tags(
        (name = "recipes", description = "Recipes owned by the caller"),
        (name = "grocery-lists", description = "Grocery lists and their items"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
