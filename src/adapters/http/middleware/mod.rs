//! HTTP middleware for axum.
//!
//! - `auth` - bearer authentication middleware and extractor
//! - `webhook_signature` - processor callback signature check

pub mod auth;
pub mod webhook_signature;

pub use auth::{auth_middleware, AuthRejection, AuthState, RequireAuth};
pub use webhook_signature::{webhook_signature_middleware, SIGNATURE_HEADER};
