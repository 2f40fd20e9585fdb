//! RespondToAssignmentHandler - partner accepts or declines an offer.
//!
//! The answer lands on both the assignment record and the reservation's
//! current-partner status. Both are checked in memory before either is
//! written, so a refused answer leaves storage untouched.

use std::sync::Arc;

use crate::application::handlers::support::{load_reservation, publish, roll_back_reservation};
use crate::application::KeyedLocks;
use crate::domain::assignment::{AssignmentEvent, AssignmentResponse, PartnerAssignment};
use crate::domain::foundation::{
    AssignmentId, AuthenticatedUser, EventId, ReservationId, SerializableDomainEvent, Timestamp,
};
use crate::domain::reservation::{Reservation, ReservationEvent, StatusChangeCause};
use crate::domain::{Resource, WorkflowError};
use crate::ports::{AssignmentRepository, EventPublisher, PartnerDirectory, ReservationRepository};

#[derive(Debug, Clone)]
pub struct RespondToAssignmentCommand {
    pub caller: AuthenticatedUser,
    pub assignment_id: AssignmentId,
    /// "accept" or "reject".
    pub action: String,
}

#[derive(Debug, Clone)]
pub struct RespondToAssignmentResult {
    pub assignment: PartnerAssignment,
    pub reservation: Reservation,
}

pub struct RespondToAssignmentHandler {
    reservations: Arc<dyn ReservationRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    partners: Arc<dyn PartnerDirectory>,
    locks: Arc<KeyedLocks<ReservationId>>,
    publisher: Arc<dyn EventPublisher>,
}

impl RespondToAssignmentHandler {
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

    async fn load_assignment(&self, id: AssignmentId) -> Result<PartnerAssignment, WorkflowError> {
        self.assignments
            .find_by_id(&id)
            .await?
            .ok_or_else(|| WorkflowError::not_found(Resource::Assignment, id))
    }

    #[tracing::instrument(skip(self, cmd), fields(assignment_id = %cmd.assignment_id, caller = %cmd.caller.id))]
    pub async fn handle(
        &self,
        cmd: RespondToAssignmentCommand,
    ) -> Result<RespondToAssignmentResult, WorkflowError> {
        // 1. Parse action
        let response: AssignmentResponse = cmd.action.parse()?;

        // 2. Only the partner the offer went to may answer
        let assignment = self.load_assignment(cmd.assignment_id).await?;
        let partner = self.partners.find_by_id(&assignment.partner_id).await?;
        match partner {
            Some(ref p) if p.is_user(&cmd.caller.id) => {}
            _ => {
                return Err(WorkflowError::forbidden(
                    "Only the partner this assignment was offered to may answer it",
                ))
            }
        }

        // 3. Reload both records under the reservation lock
        let _guard = self.locks.lock(assignment.reservation_id).await;
        let mut assignment = self.load_assignment(cmd.assignment_id).await?;
        let mut reservation =
            load_reservation(self.reservations.as_ref(), assignment.reservation_id).await?;

        let before = reservation.clone();

        // 4. Apply in memory
        let answer = assignment.respond(response)?;
        let previous_status = reservation.status;
        reservation.apply_partner_answer(assignment.partner_id, answer)?;

        // 5. Persist
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
        tracing::info!(answer = %answer, "Partner answered assignment");

        // 6. Publish
        let mut events = vec![AssignmentEvent::Answered {
            event_id: EventId::new(),
            assignment_id: assignment.id,
            reservation_id: reservation.id,
            partner_id: assignment.partner_id,
            status: answer,
            occurred_at: Timestamp::now(),
        }
        .to_envelope()];
        if reservation.status != previous_status {
            events.push(
                ReservationEvent::status_changed(
                    reservation.id,
                    previous_status,
                    reservation.status,
                    StatusChangeCause::PartnerAccepted,
                )
                .to_envelope(),
            );
        }
        publish(self.publisher.as_ref(), events).await;

        if let Some(partner) = partner {
            reservation.attach_partner(partner);
        }
        Ok(RespondToAssignmentResult {
            assignment,
            reservation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::reservation::{AssignPartnerCommand, AssignPartnerHandler};
    use crate::application::handlers::testing::{admin, as_partner, client, World};
    use crate::domain::assignment::AssignmentStatus;
    use crate::domain::partner::Partner;
    use crate::domain::reservation::ReservationStatus;

    fn handler(world: &World) -> RespondToAssignmentHandler {
        RespondToAssignmentHandler::new(
            world.reservations.clone(),
            world.assignments.clone(),
            world.partners.clone(),
            world.locks.clone(),
            world.events.clone(),
        )
    }

    async fn offer(world: &World, id: ReservationId, partner: &Partner) -> PartnerAssignment {
        AssignPartnerHandler::new(
            world.reservations.clone(),
            world.assignments.clone(),
            world.partners.clone(),
            world.locks.clone(),
            world.events.clone(),
        )
        .handle(AssignPartnerCommand {
            caller: admin(),
            reservation_id: id,
            partner_id: partner.id,
        })
        .await
        .unwrap()
        .assignment
    }

    fn answer(partner: &Partner, id: AssignmentId, action: &str) -> RespondToAssignmentCommand {
        RespondToAssignmentCommand {
            caller: as_partner(partner),
            assignment_id: id,
            action: action.to_string(),
        }
    }

    #[tokio::test]
    async fn accept_confirms_reservation() {
        let world = World::new();
        let reservation = world.reservation().await;
        let offered = offer(&world, reservation.id, &world.plumber).await;

        let result = handler(&world)
            .handle(answer(&world.plumber, offered.id, "accept"))
            .await
            .unwrap();

        assert_eq!(result.assignment.status, AssignmentStatus::Accepted);
        let stored = world.stored(reservation.id).await;
        assert_eq!(stored.status, ReservationStatus::Confirmed);
        assert_eq!(stored.partner_status(), Some(AssignmentStatus::Accepted));
        assert!(world.events.has_event("reservation.status_changed.v1"));
    }

    #[tokio::test]
    async fn reject_keeps_status_and_pointer() {
        let world = World::new();
        let reservation = world.reservation().await;
        let offered = offer(&world, reservation.id, &world.plumber).await;

        handler(&world)
            .handle(answer(&world.plumber, offered.id, "reject"))
            .await
            .unwrap();

        let stored = world.stored(reservation.id).await;
        assert_eq!(stored.status, ReservationStatus::New);
        assert_eq!(stored.assigned_partner_id(), Some(world.plumber.id));
        assert_eq!(stored.partner_status(), Some(AssignmentStatus::Declined));
        assert!(!world.events.has_event("reservation.status_changed.v1"));
    }

    #[tokio::test]
    async fn other_users_cannot_answer() {
        let world = World::new();
        let reservation = world.reservation().await;
        let offered = offer(&world, reservation.id, &world.plumber).await;

        for caller in [as_partner(&world.electrician), client()] {
            let err = handler(&world)
                .handle(RespondToAssignmentCommand {
                    caller,
                    assignment_id: offered.id,
                    action: "accept".to_string(),
                })
                .await
                .unwrap_err();
            assert!(matches!(err, WorkflowError::Forbidden(_)));
        }
        assert_eq!(world.stored(reservation.id).await.status, ReservationStatus::New);
    }

    #[tokio::test]
    async fn unknown_action_and_assignment_are_rejected() {
        let world = World::new();
        let reservation = world.reservation().await;
        let offered = offer(&world, reservation.id, &world.plumber).await;

        let bad_action = handler(&world)
            .handle(answer(&world.plumber, offered.id, "maybe"))
            .await
            .unwrap_err();
        let missing = handler(&world)
            .handle(answer(&world.plumber, AssignmentId::new(), "accept"))
            .await
            .unwrap_err();

        assert!(matches!(bad_action, WorkflowError::Validation { .. }));
        assert!(matches!(missing, WorkflowError::NotFound { resource: Resource::Assignment, .. }));
    }

    #[tokio::test]
    async fn superseded_offer_cannot_be_accepted() {
        let world = World::new();
        let reservation = world.reservation().await;
        let first = offer(&world, reservation.id, &world.plumber).await;
        offer(&world, reservation.id, &world.electrician).await;

        let err = handler(&world)
            .handle(answer(&world.plumber, first.id, "accept"))
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::Conflict(_)));
        let stored = world.stored(reservation.id).await;
        assert_eq!(stored.status, ReservationStatus::New);
        assert_eq!(stored.assigned_partner_id(), Some(world.electrician.id));
        let record = world.assignments.find_by_id(&first.id).await.unwrap().unwrap();
        assert_eq!(record.status, AssignmentStatus::Sent);
    }

    #[tokio::test]
    async fn second_answer_conflicts() {
        let world = World::new();
        let reservation = world.reservation().await;
        let offered = offer(&world, reservation.id, &world.plumber).await;
        let handler = handler(&world);
        handler
            .handle(answer(&world.plumber, offered.id, "reject"))
            .await
            .unwrap();

        let err = handler
            .handle(answer(&world.plumber, offered.id, "accept"))
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::Conflict(_)));
        assert_eq!(world.stored(reservation.id).await.status, ReservationStatus::New);
    }

    #[tokio::test]
    async fn cancelled_reservation_refuses_answers() {
        let world = World::new();
        let reservation = world.reservation().await;
        let offered = offer(&world, reservation.id, &world.plumber).await;
        let mut cancelled = world.stored(reservation.id).await;
        cancelled.change_status(ReservationStatus::Cancelled).unwrap();
        world.reservations.update(&cancelled).await.unwrap();

        let err = handler(&world)
            .handle(answer(&world.plumber, offered.id, "accept"))
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::Conflict(_)));
        let record = world.assignments.find_by_id(&offered.id).await.unwrap().unwrap();
        assert_eq!(record.status, AssignmentStatus::Sent);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn accept_racing_reassignment_leaves_new_partner_pending() {
        for _ in 0..25 {
            let world = World::new();
            let reservation = world.reservation().await;
            let first = offer(&world, reservation.id, &world.plumber).await;

            let respond = Arc::new(handler(&world));
            let reassign = Arc::new(AssignPartnerHandler::new(
                world.reservations.clone(),
                world.assignments.clone(),
                world.partners.clone(),
                world.locks.clone(),
                world.events.clone(),
            ));
            let accept = answer(&world.plumber, first.id, "accept");
            let move_to = AssignPartnerCommand {
                caller: admin(),
                reservation_id: reservation.id,
                partner_id: world.electrician.id,
            };

            let accepting = tokio::spawn(async move { respond.handle(accept).await });
            let reassigning = tokio::spawn(async move { reassign.handle(move_to).await });
            let accepted = accepting.await.unwrap();
            reassigning.await.unwrap().unwrap();

            let stored = world.stored(reservation.id).await;
            assert_eq!(stored.assigned_partner_id(), Some(world.electrician.id));
            assert_eq!(stored.partner_status(), Some(AssignmentStatus::Sent));
            let current = world
                .assignments
                .find_for(&reservation.id, &world.electrician.id)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(current.status, AssignmentStatus::Sent);

            let old = world.assignments.find_by_id(&first.id).await.unwrap().unwrap();
            match accepted {
                Ok(_) => {
                    assert_eq!(old.status, AssignmentStatus::Accepted);
                    assert_eq!(stored.status, ReservationStatus::Confirmed);
                }
                Err(e) => {
                    assert!(matches!(e, WorkflowError::Conflict(_)));
                    assert_eq!(old.status, AssignmentStatus::Sent);
                    assert_eq!(stored.status, ReservationStatus::New);
                }
            }
        }
    }
}
