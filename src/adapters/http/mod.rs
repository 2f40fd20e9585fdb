//! HTTP adapters - REST API implementations.
//!
//! Each resource has its own DTOs, handlers and routes; `router` assembles
//! them behind the shared layers.

pub mod assignment;
pub mod envelope;
pub mod middleware;
pub mod payment;
pub mod reservation;
mod router;
mod state;

pub use envelope::{ApiError, Envelope, FieldError};
pub use router::{app_router, RouterOptions};
pub use state::AppState;
