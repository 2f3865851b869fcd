//! Inbound adapters.
//!
//! Purpose: translate transport requests into calls on the domain's driving
//! ports. Only HTTP is exposed.

pub mod http;
