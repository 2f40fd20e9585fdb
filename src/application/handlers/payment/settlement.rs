//! Writes a processor outcome back to the payment and its reservation.
//!
//! Shared by the confirmation call and the processor callback so both
//! channels promote the reservation the same way.

use crate::application::handlers::support::{publish, roll_back_reservation};
use crate::domain::foundation::{EventId, SerializableDomainEvent, Timestamp};
use crate::domain::payment::{OutcomeSource, Payment, PaymentEvent, PaymentStatus, StatusChange};
use crate::domain::reservation::{
    Reservation, ReservationEvent, ReservationStatus, StatusChangeCause,
};
use crate::domain::WorkflowError;
use crate::ports::{EventPublisher, PaymentRepository, ReservationRepository};

/// What applying an outcome did, before anything is written.
#[derive(Debug, Clone)]
pub(super) struct Settlement {
    pub change: StatusChange,
    pub promoted: bool,
    /// Reservation as loaded, kept while a promotion is pending a write.
    prior: Option<Reservation>,
}

impl Settlement {
    /// Promotes a `new` reservation once the payment is paid.
    ///
    /// Runs on unchanged outcomes too, so a promotion lost to an earlier
    /// failure is picked up by the next delivery.
    pub fn after(change: StatusChange, payment: &Payment, reservation: &mut Reservation) -> Self {
        let prior = reservation.clone();
        let promoted =
            payment.status == PaymentStatus::Paid && reservation.promote_after_payment();
        Self {
            change,
            promoted,
            prior: promoted.then_some(prior),
        }
    }
}

pub(super) struct SettlementWriter<'a> {
    pub reservations: &'a dyn ReservationRepository,
    pub payments: &'a dyn PaymentRepository,
    pub publisher: &'a dyn EventPublisher,
}

impl SettlementWriter<'_> {
    /// Reservation first: its version check is the one that can refuse.
    /// A failed payment write puts the promoted reservation back.
    pub async fn write(
        &self,
        payment: &Payment,
        reservation: &Reservation,
        settlement: &Settlement,
        source: OutcomeSource,
    ) -> Result<(), WorkflowError> {
        if settlement.promoted {
            self.reservations.update(reservation).await?;
            tracing::info!(reservation_id = %reservation.id, "Reservation confirmed by payment");
        }

        let mut events = Vec::new();
        if let StatusChange::Changed { from } = settlement.change {
            if let Err(e) = self.payments.update(payment).await {
                return Err(match &settlement.prior {
                    Some(prior) => {
                        roll_back_reservation(self.reservations, prior, reservation, e.into())
                            .await
                    }
                    None => e.into(),
                });
            }
            tracing::info!(
                payment_id = %payment.id,
                from = %from,
                to = %payment.status,
                source = ?source,
                "Payment status changed"
            );
            events.push(
                PaymentEvent::StatusChanged {
                    event_id: EventId::new(),
                    payment_id: payment.id,
                    reservation_id: payment.reservation_id,
                    from,
                    to: payment.status,
                    source,
                    occurred_at: Timestamp::now(),
                }
                .to_envelope(),
            );
        }
        if settlement.promoted {
            events.push(
                ReservationEvent::status_changed(
                    reservation.id,
                    ReservationStatus::New,
                    ReservationStatus::Confirmed,
                    StatusChangeCause::PaymentSucceeded,
                )
                .to_envelope(),
            );
        }
        publish(self.publisher, events).await;
        Ok(())
    }
}
