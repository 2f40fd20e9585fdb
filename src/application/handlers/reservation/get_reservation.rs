//! GetReservationHandler - read one reservation.

use std::sync::Arc;

use crate::application::handlers::support::{is_assigned_partner, load_reservation};
use crate::domain::foundation::{AuthenticatedUser, OwnedByUser, Reference, ReservationId};
use crate::domain::reservation::Reservation;
use crate::domain::WorkflowError;
use crate::ports::{Catalog, PartnerDirectory, ReservationRepository};

#[derive(Debug, Clone)]
pub struct GetReservationQuery {
    pub caller: AuthenticatedUser,
    pub reservation_id: ReservationId,
}

/// Visible to the owning client, admins, and the user behind the currently
/// assigned partner (whatever that partner answered).
pub struct GetReservationHandler {
    reservations: Arc<dyn ReservationRepository>,
    partners: Arc<dyn PartnerDirectory>,
    catalog: Arc<dyn Catalog>,
}

impl GetReservationHandler {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        partners: Arc<dyn PartnerDirectory>,
        catalog: Arc<dyn Catalog>,
    ) -> Self {
        Self {
            reservations,
            partners,
            catalog,
        }
    }

    #[tracing::instrument(skip(self, query), fields(reservation_id = %query.reservation_id, caller = %query.caller.id))]
    pub async fn handle(&self, query: GetReservationQuery) -> Result<Reservation, WorkflowError> {
        let mut reservation =
            load_reservation(self.reservations.as_ref(), query.reservation_id).await?;

        let allowed = query.caller.is_admin()
            || reservation.is_owner(&query.caller.id)
            || is_assigned_partner(self.partners.as_ref(), &mut reservation, &query.caller.id)
                .await?;
        if !allowed {
            return Err(WorkflowError::forbidden(format!(
                "Not allowed to view reservation {}",
                reservation.id
            )));
        }

        // Best effort: an unknown service leaves the bare id in place.
        if let Some(service) = self.catalog.find_service(&reservation.service.id()).await? {
            reservation.service = Reference::Resolved(service);
        }
        Ok(reservation)
    }
}
