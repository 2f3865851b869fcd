//! Identity provider adapters implementing the `TokenVerifier` port.

mod introspection;

pub use introspection::{IntrospectionTokenVerifier, TokenRejection, fingerprint};
