//! Assignment domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AssignmentId, EventId, PartnerId, ReservationId, Timestamp};

use super::AssignmentStatus;

/// Events emitted by the assignment negotiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssignmentEvent {
    /// Operator offered the reservation to a partner (first time or again).
    Offered {
        event_id: EventId,
        assignment_id: AssignmentId,
        reservation_id: ReservationId,
        partner_id: PartnerId,
        occurred_at: Timestamp,
    },

    /// Partner accepted or declined.
    Answered {
        event_id: EventId,
        assignment_id: AssignmentId,
        reservation_id: ReservationId,
        partner_id: PartnerId,
        status: AssignmentStatus,
        occurred_at: Timestamp,
    },
}

crate::domain_event_enum!(
    AssignmentEvent,
    aggregate_type = "PartnerAssignment",
    aggregate_id = assignment_id,
    {
        Offered => "assignment.offered.v1",
        Answered => "assignment.answered.v1",
    }
);
