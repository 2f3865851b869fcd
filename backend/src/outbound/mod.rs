//! Driven adapters: persistence, in-memory backends and identity.

pub mod identity;
pub mod memory;
pub mod persistence;
