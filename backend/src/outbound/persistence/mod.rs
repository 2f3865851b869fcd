//! PostgreSQL persistence adapters built on Diesel.
//!
//! - **Thin adapters**: repositories translate between rows and domain types;
//!   patch semantics and stamps come from the domain.
//! - **Internal models**: `models.rs` and `schema.rs` never leave this module.
//! - **Async pooling**: `diesel-async` connections checked out from `bb8`.
//! - **Embedded migrations**: applied at startup by [`run_pending_migrations`].
//!
//! # Example
//!
//! ```ignore
//! use pantry::outbound::persistence::{DbPool, DieselRecipeRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/pantry")).await?;
//! let recipes = DieselRecipeRepository::new(pool, Arc::new(mockable::DefaultClock));
//! ```

mod diesel_error_mapping;
mod diesel_grocery_list_repository;
mod diesel_recipe_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_grocery_list_repository::DieselGroceryListRepository;
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError, redact_database_url};
