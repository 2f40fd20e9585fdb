//! Lookups and checks shared by the workflow handlers.

use crate::domain::foundation::{
    EventEnvelope, OwnedByUser, PartnerId, ReservationId, Timestamp, UserId,
};
use crate::domain::partner::Partner;
use crate::domain::reservation::Reservation;
use crate::domain::{Resource, WorkflowError};
use crate::ports::{EventPublisher, PartnerDirectory, ReservationRepository};

pub(crate) async fn load_reservation(
    reservations: &dyn ReservationRepository,
    id: ReservationId,
) -> Result<Reservation, WorkflowError> {
    reservations
        .find_by_id(&id)
        .await?
        .ok_or_else(|| WorkflowError::not_found(Resource::Reservation, id))
}

pub(crate) async fn load_partner(
    partners: &dyn PartnerDirectory,
    id: PartnerId,
) -> Result<Partner, WorkflowError> {
    partners
        .find_by_id(&id)
        .await?
        .ok_or_else(|| WorkflowError::not_found(Resource::Partner, id))
}

/// Resolves the reservation's current partner and reports whether `caller`
/// is the user behind it.
///
/// Works on either form of the partner reference; a freshly loaded partner
/// is attached to the reservation.
pub(crate) async fn is_assigned_partner(
    partners: &dyn PartnerDirectory,
    reservation: &mut Reservation,
    caller: &UserId,
) -> Result<bool, WorkflowError> {
    let Some(current) = reservation.assignment.as_ref() else {
        return Ok(false);
    };
    let partner = current
        .partner
        .resolve(|id| async move { partners.find_by_id(&id).await })
        .await?;

    match partner {
        Some(partner) => {
            let matches = partner.is_user(caller);
            reservation.attach_partner(partner);
            Ok(matches)
        }
        None => {
            tracing::warn!(
                reservation_id = %reservation.id,
                "Assigned partner no longer in directory"
            );
            Ok(false)
        }
    }
}

pub(crate) fn ensure_owner(reservation: &Reservation, caller: &UserId) -> Result<(), WorkflowError> {
    reservation.check_ownership(caller).map_err(|_| {
        WorkflowError::forbidden(format!(
            "Only the client who booked reservation {} may do this",
            reservation.id
        ))
    })
}

/// Puts `before` back after a later write in the same operation failed.
///
/// `written` is what the earlier update stored; the restore is one more
/// versioned update on top of it. Returns `cause` so callers can bail out
/// with the failure that triggered the rollback.
pub(crate) async fn roll_back_reservation(
    reservations: &dyn ReservationRepository,
    before: &Reservation,
    written: &Reservation,
    cause: WorkflowError,
) -> WorkflowError {
    let mut restored = before.clone();
    restored.version = written.version + 1;
    restored.updated_at = Timestamp::now();

    match reservations.update(&restored).await {
        Ok(()) => tracing::warn!(
            reservation_id = %before.id,
            error = %cause,
            "Reservation write rolled back"
        ),
        Err(e) => tracing::error!(
            reservation_id = %before.id,
            error = %cause,
            "Reservation rollback failed: {}",
            e
        ),
    }
    cause
}

/// Publishes after a successful write. Failures are logged, never returned.
pub(crate) async fn publish(publisher: &dyn EventPublisher, events: Vec<EventEnvelope>) {
    if events.is_empty() {
        return;
    }
    if let Err(e) = publisher.publish_all(events).await {
        tracing::error!(code = %e.code, "Failed to publish domain events: {}", e);
    }
}
