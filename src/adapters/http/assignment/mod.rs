//! HTTP adapter for partner assignment endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{AssignmentResponse, RespondRequest, RespondResponse};
pub use routes::assignment_routes;
