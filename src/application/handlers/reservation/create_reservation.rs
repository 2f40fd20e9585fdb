//! CreateReservationHandler - client books a catalog service.

use std::sync::Arc;

use crate::domain::foundation::{
    AuthenticatedUser, EventId, SerializableDomainEvent, ServiceId, Timestamp,
};
use crate::domain::reservation::{Reservation, ReservationDetails, ReservationEvent};
use crate::domain::{Resource, WorkflowError};
use crate::ports::{Catalog, EventPublisher, ReservationRepository};

use crate::application::handlers::support::publish;

#[derive(Debug, Clone)]
pub struct CreateReservationCommand {
    pub caller: AuthenticatedUser,
    pub service_id: ServiceId,
    pub details: ReservationDetails,
}

#[derive(Debug, Clone)]
pub struct CreateReservationResult {
    pub reservation: Reservation,
}

/// Any authenticated caller may book; the caller becomes the owner.
pub struct CreateReservationHandler {
    catalog: Arc<dyn Catalog>,
    reservations: Arc<dyn ReservationRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl CreateReservationHandler {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        reservations: Arc<dyn ReservationRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            catalog,
            reservations,
            publisher,
        }
    }

    #[tracing::instrument(skip(self, cmd), fields(client_id = %cmd.caller.id, service_id = %cmd.service_id))]
    pub async fn handle(
        &self,
        cmd: CreateReservationCommand,
    ) -> Result<CreateReservationResult, WorkflowError> {
        // 1. Resolve the service
        let service = self
            .catalog
            .find_service(&cmd.service_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found(Resource::Service, cmd.service_id))?;
        if !self.catalog.category_exists(&service.category_id).await? {
            return Err(WorkflowError::validation(
                "service_id",
                format!("Service {} is not in a bookable category", service.id),
            ));
        }

        // 2. Build and validate against today's UTC date
        let reservation =
            Reservation::create(cmd.caller.id, service, cmd.details, Timestamp::today())?;

        // 3. Persist
        self.reservations.save(&reservation).await?;
        tracing::info!(reservation_id = %reservation.id, "Reservation created");

        // 4. Publish
        let event = ReservationEvent::Created {
            event_id: EventId::new(),
            reservation_id: reservation.id,
            client_id: reservation.client_id.clone(),
            service_id: reservation.service.id(),
            occurred_at: reservation.created_at,
        };
        publish(self.publisher.as_ref(), vec![event.to_envelope()]).await;

        Ok(CreateReservationResult { reservation })
    }
}
