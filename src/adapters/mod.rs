//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - bearer token validation
//! - `events` - event bus
//! - `http` - REST surface (axum)
//! - `memory` - in-memory persistence, catalog and partner directory
//! - `processor` - payment processor stand-in

pub mod auth;
pub mod events;
pub mod http;
pub mod memory;
pub mod processor;
