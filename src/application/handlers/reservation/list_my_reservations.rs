//! ListMyReservationsHandler - the caller's own bookings.

use std::sync::Arc;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::reservation::Reservation;
use crate::domain::WorkflowError;
use crate::ports::ReservationRepository;

#[derive(Debug, Clone)]
pub struct ListMyReservationsQuery {
    pub caller: AuthenticatedUser,
}

pub struct ListMyReservationsHandler {
    reservations: Arc<dyn ReservationRepository>,
}

impl ListMyReservationsHandler {
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }

    /// Newest first.
    pub async fn handle(
        &self,
        query: ListMyReservationsQuery,
    ) -> Result<Vec<Reservation>, WorkflowError> {
        Ok(self.reservations.list_by_client(&query.caller.id).await?)
    }
}
