//! CreatePaymentIntentHandler - client opens a payment for their reservation.

use std::sync::Arc;

use crate::application::handlers::support::{
    ensure_owner, load_reservation, publish, roll_back_reservation,
};
use crate::application::KeyedLocks;
use crate::domain::foundation::{
    AuthenticatedUser, DomainError, EventId, ReservationId, SerializableDomainEvent, Timestamp,
};
use crate::domain::payment::{to_minor_units, Payment, PaymentEvent};
use crate::domain::reservation::ReservationEvent;
use crate::domain::WorkflowError;
use crate::ports::{EventPublisher, PaymentProcessor, PaymentRepository, ReservationRepository};

#[derive(Debug, Clone)]
pub struct CreatePaymentIntentCommand {
    pub caller: AuthenticatedUser,
    pub reservation_id: ReservationId,
    /// Major currency units, e.g. 49.95.
    pub amount: f64,
}

#[derive(Debug, Clone)]
pub struct CreatePaymentIntentResult {
    /// Handed to the client to finish payment with the processor.
    pub client_secret: String,
    pub intent_id: String,
    pub payment: Payment,
}

pub struct CreatePaymentIntentHandler {
    reservations: Arc<dyn ReservationRepository>,
    payments: Arc<dyn PaymentRepository>,
    processor: Arc<dyn PaymentProcessor>,
    locks: Arc<KeyedLocks<ReservationId>>,
    publisher: Arc<dyn EventPublisher>,
    currency: String,
}

impl CreatePaymentIntentHandler {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        payments: Arc<dyn PaymentRepository>,
        processor: Arc<dyn PaymentProcessor>,
        locks: Arc<KeyedLocks<ReservationId>>,
        publisher: Arc<dyn EventPublisher>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            reservations,
            payments,
            processor,
            locks,
            publisher,
            currency: currency.into(),
        }
    }

    #[tracing::instrument(skip(self, cmd), fields(reservation_id = %cmd.reservation_id, caller = %cmd.caller.id))]
    pub async fn handle(
        &self,
        cmd: CreatePaymentIntentCommand,
    ) -> Result<CreatePaymentIntentResult, WorkflowError> {
        // 1. Amount in minor units
        let amount_minor = to_minor_units(cmd.amount)?;

        // 2. Load under lock
        let _guard = self.locks.lock(cmd.reservation_id).await;
        let mut reservation =
            load_reservation(self.reservations.as_ref(), cmd.reservation_id).await?;
        let before = reservation.clone();

        // 3. Owner of a live reservation only
        ensure_owner(&reservation, &cmd.caller.id)?;
        reservation.ensure_live()?;

        // 4. At most one payment in play; a failed one may be replaced
        if let Some(payment_id) = reservation.payment_id {
            if let Some(existing) = self.payments.find_by_id(&payment_id).await? {
                if !existing.is_replaceable() {
                    return Err(WorkflowError::conflict(format!(
                        "Reservation {} already has a {} payment",
                        reservation.id, existing.status
                    )));
                }
            }
        }

        // 5. Processor intent
        let intent = self
            .processor
            .create_intent(amount_minor, &self.currency)
            .await
            .map_err(DomainError::from)?;

        // 6. Payment record and back-reference
        let payment = Payment::open(
            reservation.id,
            intent.amount_minor,
            intent.currency.clone(),
            intent.id.clone(),
        );
        reservation.link_payment(payment.id)?;

        // 7. Persist, reservation first so a stale write stops here
        self.reservations.update(&reservation).await?;
        if let Err(e) = self.payments.save(&payment).await {
            return Err(roll_back_reservation(
                self.reservations.as_ref(),
                &before,
                &reservation,
                e.into(),
            )
            .await);
        }
        tracing::info!(payment_id = %payment.id, intent_id = %intent.id, amount_minor, "Payment intent created");

        // 8. Publish
        let now = Timestamp::now();
        let events = vec![
            PaymentEvent::Created {
                event_id: EventId::new(),
                payment_id: payment.id,
                reservation_id: reservation.id,
                amount_minor: payment.amount_minor,
                currency: payment.currency.clone(),
                occurred_at: now,
            }
            .to_envelope(),
            ReservationEvent::PaymentLinked {
                event_id: EventId::new(),
                reservation_id: reservation.id,
                payment_id: payment.id,
                occurred_at: now,
            }
            .to_envelope(),
        ];
        publish(self.publisher.as_ref(), events).await;

        Ok(CreatePaymentIntentResult {
            client_secret: intent.client_secret,
            intent_id: intent.id,
            payment,
        })
    }
}
