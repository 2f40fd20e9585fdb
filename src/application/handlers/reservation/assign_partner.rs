//! AssignPartnerHandler - admin offers a reservation to a partner.
//!
//! Offering upserts the (reservation, partner) assignment to `sent` and
//! repoints the reservation at that partner, replacing any earlier one.

use std::sync::Arc;

use crate::application::handlers::support::{
    load_partner, load_reservation, publish, roll_back_reservation,
};
use crate::application::KeyedLocks;
use crate::domain::assignment::{AssignmentEvent, PartnerAssignment};
use crate::domain::foundation::{
    AuthenticatedUser, EventId, PartnerId, ReservationId, SerializableDomainEvent, Timestamp,
};
use crate::domain::reservation::{Reservation, ReservationEvent};
use crate::domain::WorkflowError;
use crate::ports::{AssignmentRepository, EventPublisher, PartnerDirectory, ReservationRepository};

#[derive(Debug, Clone)]
pub struct AssignPartnerCommand {
    pub caller: AuthenticatedUser,
    pub reservation_id: ReservationId,
    pub partner_id: PartnerId,
}

#[derive(Debug, Clone)]
pub struct AssignPartnerResult {
    /// Reservation with the new partner resolved.
    pub reservation: Reservation,
    pub assignment: PartnerAssignment,
}

pub struct AssignPartnerHandler {
    reservations: Arc<dyn ReservationRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    partners: Arc<dyn PartnerDirectory>,
    locks: Arc<KeyedLocks<ReservationId>>,
    publisher: Arc<dyn EventPublisher>,
}

impl AssignPartnerHandler {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        partners: Arc<dyn PartnerDirectory>,
        locks: Arc<KeyedLocks<ReservationId>>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            reservations,
            assignments,
            partners,
            locks,
            publisher,
        }
    }

    #[tracing::instrument(skip(self, cmd), fields(reservation_id = %cmd.reservation_id, partner_id = %cmd.partner_id))]
    pub async fn handle(
        &self,
        cmd: AssignPartnerCommand,
    ) -> Result<AssignPartnerResult, WorkflowError> {
        // 1. Admin only
        if !cmd.caller.is_admin() {
            return Err(WorkflowError::forbidden("Only an admin may assign partners"));
        }

        // 2. Partner must exist and be verified
        let partner = load_partner(self.partners.as_ref(), cmd.partner_id).await?;
        if !partner.verified {
            return Err(WorkflowError::validation(
                "partner_id",
                format!("Partner {} is not verified", partner.id),
            ));
        }

        // 3. Load under lock
        let _guard = self.locks.lock(cmd.reservation_id).await;
        let mut reservation =
            load_reservation(self.reservations.as_ref(), cmd.reservation_id).await?;
        let before = reservation.clone();

        // 4. Repoint the reservation
        reservation.assign_partner(partner.id)?;

        // 5. Upsert the assignment record
        let (assignment, reissued) = match self
            .assignments
            .find_for(&reservation.id, &partner.id)
            .await?
        {
            Some(mut existing) => {
                existing.reissue();
                (existing, true)
            }
            None => (PartnerAssignment::issue(reservation.id, partner.id), false),
        };

        // 6. Persist, reservation first so a stale write stops here
        self.reservations.update(&reservation).await?;
        if let Err(e) = self.assignments.save(&assignment).await {
            return Err(roll_back_reservation(
                self.reservations.as_ref(),
                &before,
                &reservation,
                e.into(),
            )
            .await);
        }
        tracing::info!(assignment_id = %assignment.id, reissued, "Partner assigned");

        // 7. Publish
        let now = Timestamp::now();
        let events = vec![
            ReservationEvent::PartnerAssigned {
                event_id: EventId::new(),
                reservation_id: reservation.id,
                partner_id: partner.id,
                occurred_at: now,
            }
            .to_envelope(),
            AssignmentEvent::Offered {
                event_id: EventId::new(),
                assignment_id: assignment.id,
                reservation_id: reservation.id,
                partner_id: partner.id,
                occurred_at: now,
            }
            .to_envelope(),
        ];
        publish(self.publisher.as_ref(), events).await;

        reservation.attach_partner(partner);
        Ok(AssignPartnerResult {
            reservation,
            assignment,
        })
    }
}
