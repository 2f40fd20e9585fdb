//! HTTP handlers for partner assignment endpoints.

use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::adapters::http::envelope::{ok, parse_id, ApiError, ApiJson};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::assignment::{
    ListPartnerAssignmentsQuery, RespondToAssignmentCommand,
};
use crate::domain::foundation::AssignmentId;

use super::dto::{AssignmentResponse, RespondRequest, RespondResponse};

/// POST /partners/assignments/:id/respond
pub async fn respond_to_assignment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<RespondRequest>,
) -> Result<Response, ApiError> {
    let cmd = RespondToAssignmentCommand {
        caller: user,
        assignment_id: parse_id::<AssignmentId>("id", &id)?,
        action: req.action,
    };

    let result = state.respond_handler().handle(cmd).await?;
    Ok(ok(
        "Assignment answered",
        RespondResponse {
            assignment: result.assignment.into(),
            reservation: result.reservation.into(),
        },
    ))
}

/// GET /partners/assignments/me
pub async fn list_my_assignments(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Response, ApiError> {
    let assignments = state
        .list_partner_assignments_handler()
        .handle(ListPartnerAssignmentsQuery { caller: user })
        .await?;

    let body: Vec<AssignmentResponse> = assignments.into_iter().map(Into::into).collect();
    Ok(ok("Assignments retrieved", body))
}
