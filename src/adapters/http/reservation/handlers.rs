//! HTTP handlers for reservation endpoints.

use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::adapters::http::envelope::{created, ok, parse_id, ApiError, ApiJson};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::reservation::{
    AssignPartnerCommand, CreateReservationCommand, GetReservationQuery, ListMyReservationsQuery,
    UpdateReservationStatusCommand,
};
use crate::domain::foundation::{PartnerId, ReservationId, ServiceId};

use super::dto::{
    AssignPartnerRequest, CreateReservationRequest, ReservationResponse, UpdateStatusRequest,
};

/// POST /reservations
pub async fn create_reservation(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(req): ApiJson<CreateReservationRequest>,
) -> Result<Response, ApiError> {
    let cmd = CreateReservationCommand {
        caller: user,
        service_id: parse_id::<ServiceId>("service_id", &req.service_id)?,
        details: req.details(),
    };

    let result = state.create_reservation_handler().handle(cmd).await?;
    Ok(created(
        "Reservation created",
        ReservationResponse::from(result.reservation),
    ))
}

/// GET /reservations/me
pub async fn list_my_reservations(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Response, ApiError> {
    let reservations = state
        .list_my_reservations_handler()
        .handle(ListMyReservationsQuery { caller: user })
        .await?;

    let body: Vec<ReservationResponse> = reservations.into_iter().map(Into::into).collect();
    Ok(ok("Reservations retrieved", body))
}

/// GET /reservations/:id
pub async fn get_reservation(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let query = GetReservationQuery {
        caller: user,
        reservation_id: parse_id::<ReservationId>("id", &id)?,
    };

    let reservation = state.get_reservation_handler().handle(query).await?;
    Ok(ok("Reservation retrieved", ReservationResponse::from(reservation)))
}

/// PUT /reservations/:id/status
pub async fn update_reservation_status(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateStatusRequest>,
) -> Result<Response, ApiError> {
    let cmd = UpdateReservationStatusCommand {
        caller: user,
        reservation_id: parse_id::<ReservationId>("id", &id)?,
        status: req.status,
    };

    let reservation = state.update_status_handler().handle(cmd).await?;
    Ok(ok(
        "Reservation status updated",
        ReservationResponse::from(reservation),
    ))
}

/// POST /reservations/:id/assign
pub async fn assign_partner(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<AssignPartnerRequest>,
) -> Result<Response, ApiError> {
    let cmd = AssignPartnerCommand {
        caller: user,
        reservation_id: parse_id::<ReservationId>("id", &id)?,
        partner_id: parse_id::<PartnerId>("partner_id", &req.partner_id)?,
    };

    let result = state.assign_partner_handler().handle(cmd).await?;
    Ok(ok(
        "Partner assigned",
        ReservationResponse::from(result.reservation),
    ))
}
