//! UpdateReservationStatusHandler - admin or assigned partner moves the status.

use std::sync::Arc;

use crate::application::handlers::support::{is_assigned_partner, load_reservation, publish};
use crate::application::KeyedLocks;
use crate::domain::foundation::{AuthenticatedUser, ReservationId, SerializableDomainEvent};
use crate::domain::reservation::{
    Reservation, ReservationEvent, ReservationStatus, StatusChangeCause,
};
use crate::domain::WorkflowError;
use crate::ports::{EventPublisher, PartnerDirectory, ReservationRepository};

#[derive(Debug, Clone)]
pub struct UpdateReservationStatusCommand {
    pub caller: AuthenticatedUser,
    pub reservation_id: ReservationId,
    /// Wire name of the target status.
    pub status: String,
}

pub struct UpdateReservationStatusHandler {
    reservations: Arc<dyn ReservationRepository>,
    partners: Arc<dyn PartnerDirectory>,
    locks: Arc<KeyedLocks<ReservationId>>,
    publisher: Arc<dyn EventPublisher>,
}

impl UpdateReservationStatusHandler {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        partners: Arc<dyn PartnerDirectory>,
        locks: Arc<KeyedLocks<ReservationId>>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            reservations,
            partners,
            locks,
            publisher,
        }
    }

    #[tracing::instrument(skip(self, cmd), fields(reservation_id = %cmd.reservation_id, caller = %cmd.caller.id))]
    pub async fn handle(
        &self,
        cmd: UpdateReservationStatusCommand,
    ) -> Result<Reservation, WorkflowError> {
        // 1. Parse target
        let target: ReservationStatus = cmd.status.parse()?;

        // 2. Serialize with other writers on this reservation
        let _guard = self.locks.lock(cmd.reservation_id).await;
        let mut reservation =
            load_reservation(self.reservations.as_ref(), cmd.reservation_id).await?;

        // 3. Authorize
        let allowed = cmd.caller.is_admin()
            || is_assigned_partner(self.partners.as_ref(), &mut reservation, &cmd.caller.id)
                .await?;
        if !allowed {
            return Err(WorkflowError::forbidden(
                "Only an admin or the assigned partner may change the status",
            ));
        }

        // 4. Transition
        let previous = reservation.change_status(target)?;

        // 5. Persist
        self.reservations.update(&reservation).await?;
        tracing::info!(from = %previous, to = %target, "Reservation status changed");

        // 6. Publish
        let event = ReservationEvent::status_changed(
            reservation.id,
            previous,
            target,
            StatusChangeCause::Manual,
        );
        publish(self.publisher.as_ref(), vec![event.to_envelope()]).await;

        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{admin, as_partner, client, World};

    fn handler(world: &World) -> UpdateReservationStatusHandler {
        UpdateReservationStatusHandler::new(
            world.reservations.clone(),
            world.partners.clone(),
            world.locks.clone(),
            world.events.clone(),
        )
    }

    fn command(
        caller: AuthenticatedUser,
        id: ReservationId,
        status: &str,
    ) -> UpdateReservationStatusCommand {
        UpdateReservationStatusCommand {
            caller,
            reservation_id: id,
            status: status.to_string(),
        }
    }

    #[tokio::test]
    async fn admin_moves_status_loosely() {
        let world = World::new();
        let reservation = world.reservation().await;
        let handler = handler(&world);

        handler
            .handle(command(admin(), reservation.id, "completed"))
            .await
            .unwrap();
        let back = handler
            .handle(command(admin(), reservation.id, "in-progress"))
            .await
            .unwrap();

        assert_eq!(back.status, ReservationStatus::InProgress);
        assert_eq!(world.stored(reservation.id).await.version, 3);
        assert_eq!(
            world
                .events
                .events_of_type("reservation.status_changed.v1")
                .len(),
            2
        );
    }

    #[tokio::test]
    async fn assigned_partner_may_update() {
        let world = World::new();
        let mut reservation = world.reservation().await;
        reservation.assign_partner(world.plumber.id).unwrap();
        world.reservations.update(&reservation).await.unwrap();

        let updated = handler(&world)
            .handle(command(
                as_partner(&world.plumber),
                reservation.id,
                "in-progress",
            ))
            .await
            .unwrap();

        assert_eq!(updated.status, ReservationStatus::InProgress);
    }

    #[tokio::test]
    async fn owner_and_unassigned_partner_are_forbidden() {
        let world = World::new();
        let reservation = world.reservation().await;

        for caller in [client(), as_partner(&world.plumber)] {
            let err = handler(&world)
                .handle(command(caller, reservation.id, "confirmed"))
                .await
                .unwrap_err();
            assert!(matches!(err, WorkflowError::Forbidden(_)));
        }
        assert_eq!(world.stored(reservation.id).await.status, ReservationStatus::New);
    }

    #[tokio::test]
    async fn unknown_status_is_validation_error() {
        let world = World::new();
        let reservation = world.reservation().await;

        let err = handler(&world)
            .handle(command(admin(), reservation.id, "done"))
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::Validation { ref field, .. } if field == "status"));
    }

    #[tokio::test]
    async fn cancelled_reservation_is_frozen() {
        let world = World::new();
        let reservation = world.reservation().await;
        let handler = handler(&world);
        handler
            .handle(command(admin(), reservation.id, "cancelled"))
            .await
            .unwrap();

        let err = handler
            .handle(command(admin(), reservation.id, "new"))
            .await
            .unwrap_err();

        assert!(matches!(err, WorkflowError::Conflict(_)));
        assert_eq!(
            world.stored(reservation.id).await.status,
            ReservationStatus::Cancelled
        );
    }
}
