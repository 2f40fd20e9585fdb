//! HTTP routes for reservation endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    assign_partner, create_reservation, get_reservation, list_my_reservations,
    update_reservation_status,
};

/// Reservation routes, mounted at `/reservations`. All require a bearer token.
pub fn reservation_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_reservation))
        .route("/me", get(list_my_reservations))
        .route("/:id", get(get_reservation))
        .route("/:id/status", put(update_reservation_status))
        .route("/:id/assign", post(assign_partner))
}
