//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod grocery_lists;
pub mod health;
pub mod recipes;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register the authenticated `/api/v1` resources.
///
/// Callers register [`state::HttpState`] as app data; the JSON extractor
/// configuration is attached to the scope so malformed bodies produce the
/// standard error payload.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use pantry::inbound::http::configure_api;
///
/// let _app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(validation::json_config())
            .service(recipes::create_recipe)
            .service(recipes::list_recipes)
            .service(recipes::get_recipe)
            .service(recipes::update_recipe)
            .service(recipes::delete_recipe)
            .service(grocery_lists::create_grocery_list)
            .service(grocery_lists::list_grocery_lists)
            .service(grocery_lists::get_grocery_list)
            .service(grocery_lists::update_grocery_list)
            .service(grocery_lists::delete_grocery_list)
            .service(grocery_lists::add_grocery_item)
            .service(grocery_lists::update_grocery_item)
            .service(grocery_lists::delete_grocery_item),
    );
}
