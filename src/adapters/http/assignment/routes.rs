//! HTTP routes for partner assignment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{list_my_assignments, respond_to_assignment};

/// Partner routes, mounted at `/partners`. All require a bearer token.
pub fn assignment_routes() -> Router<AppState> {
    Router::new()
        .route("/assignments/me", get(list_my_assignments))
        .route("/assignments/:id/respond", post(respond_to_assignment))
}
