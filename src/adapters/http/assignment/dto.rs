//! HTTP DTOs for partner assignment endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::reservation::ReservationResponse;
use crate::domain::assignment::{AssignmentStatus, PartnerAssignment};
use crate::domain::foundation::Timestamp;

#[derive(Debug, Clone, Deserialize)]
pub struct RespondRequest {
    /// "accept" or "reject".
    pub action: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentResponse {
    pub id: String,
    pub reservation_id: String,
    pub partner_id: String,
    pub status: AssignmentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<PartnerAssignment> for AssignmentResponse {
    fn from(a: PartnerAssignment) -> Self {
        Self {
            id: a.id.to_string(),
            reservation_id: a.reservation_id.to_string(),
            partner_id: a.partner_id.to_string(),
            status: a.status,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

/// Answer outcome: the assignment plus the reservation it changed.
#[derive(Debug, Clone, Serialize)]
pub struct RespondResponse {
    pub assignment: AssignmentResponse,
    pub reservation: ReservationResponse,
}
