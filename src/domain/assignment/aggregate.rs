//! Partner assignment record.
//!
//! One record per (reservation, partner) pair. Re-offering the same partner
//! reuses the record and resets it to `Sent`; offering a different partner
//! creates a new record while the old one stays behind, no longer current.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AssignmentId, PartnerId, ReservationId, StateMachine, Timestamp, ValidationError,
};
use crate::domain::WorkflowError;

use super::AssignmentStatus;

/// A partner's answer to an assignment offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentResponse {
    Accept,
    Reject,
}

impl AssignmentResponse {
    fn target_status(&self) -> AssignmentStatus {
        match self {
            AssignmentResponse::Accept => AssignmentStatus::Accepted,
            AssignmentResponse::Reject => AssignmentStatus::Declined,
        }
    }
}

impl FromStr for AssignmentResponse {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accept" => Ok(AssignmentResponse::Accept),
            "reject" => Ok(AssignmentResponse::Reject),
            other => Err(ValidationError::invalid_format(
                "action",
                format!("'{}' is not one of accept, reject", other),
            )),
        }
    }
}

/// Offer of a reservation to a specific partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerAssignment {
    pub id: AssignmentId,
    pub reservation_id: ReservationId,
    pub partner_id: PartnerId,
    pub status: AssignmentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PartnerAssignment {
    /// Offers `reservation_id` to `partner_id`.
    pub fn issue(reservation_id: ReservationId, partner_id: PartnerId) -> Self {
        let now = Timestamp::now();
        Self {
            id: AssignmentId::new(),
            reservation_id,
            partner_id,
            status: AssignmentStatus::Sent,
            created_at: now,
            updated_at: now,
        }
    }

    /// Re-offers to the same partner, whatever they answered before.
    pub fn reissue(&mut self) {
        self.status = AssignmentStatus::Sent;
        self.updated_at = Timestamp::now();
    }

    /// True while the partner has not answered.
    pub fn is_open(&self) -> bool {
        self.status == AssignmentStatus::Sent
    }

    /// Records the partner's answer.
    ///
    /// # Errors
    ///
    /// `Conflict` if the offer was already answered.
    pub fn respond(
        &mut self,
        response: AssignmentResponse,
    ) -> Result<AssignmentStatus, WorkflowError> {
        let target = response.target_status();
        self.status = self.status.transition_to(target).map_err(|_| {
            WorkflowError::conflict(format!(
                "Assignment {} was already answered ({})",
                self.id, self.status
            ))
        })?;
        self.updated_at = Timestamp::now();
        Ok(self.status)
    }
}
