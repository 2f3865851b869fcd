//! Pantry: recipes and grocery lists, each visible only to its owner.
//!
//! The crate follows a hexagonal layout: [`domain`] holds entities, services
//! and ports; [`inbound`] adapts HTTP onto the driving ports; [`outbound`]
//! implements the driven ports with Diesel, in-memory storage and an identity
//! provider client.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
