//! HTTP adapter for reservation endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AssignPartnerRequest, CreateReservationRequest, PartnerView, ReservationResponse,
    ServiceView, UpdateStatusRequest,
};
pub use routes::reservation_routes;
