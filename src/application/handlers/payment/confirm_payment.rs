//! ConfirmPaymentHandler - client asks the processor to settle an intent.

use std::sync::Arc;

use crate::application::handlers::support::{ensure_owner, load_reservation};
use crate::application::KeyedLocks;
use crate::domain::foundation::{AuthenticatedUser, DomainError, ReservationId};
use crate::domain::payment::{IntentStatus, OutcomeSource, Payment, PaymentStatus, StatusChange};
use crate::domain::{Resource, WorkflowError};
use crate::ports::{EventPublisher, PaymentProcessor, PaymentRepository, ReservationRepository};

use super::settlement::{Settlement, SettlementWriter};

#[derive(Debug, Clone)]
pub struct ConfirmPaymentCommand {
    pub caller: AuthenticatedUser,
    pub intent_id: String,
    /// Outcome the processor stub should produce.
    pub simulate_success: bool,
}

#[derive(Debug, Clone)]
pub struct ConfirmPaymentResult {
    pub payment: Payment,
    pub intent_status: IntentStatus,
    pub reservation_promoted: bool,
}

pub struct ConfirmPaymentHandler {
    reservations: Arc<dyn ReservationRepository>,
    payments: Arc<dyn PaymentRepository>,
    processor: Arc<dyn PaymentProcessor>,
    locks: Arc<KeyedLocks<ReservationId>>,
    publisher: Arc<dyn EventPublisher>,
}

impl ConfirmPaymentHandler {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        payments: Arc<dyn PaymentRepository>,
        processor: Arc<dyn PaymentProcessor>,
        locks: Arc<KeyedLocks<ReservationId>>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            reservations,
            payments,
            processor,
            locks,
            publisher,
        }
    }

    async fn load_payment(&self, intent_id: &str) -> Result<Payment, WorkflowError> {
        self.payments
            .find_by_intent_id(intent_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found(Resource::Payment, intent_id))
    }

    #[tracing::instrument(skip(self, cmd), fields(intent_id = %cmd.intent_id, caller = %cmd.caller.id))]
    pub async fn handle(
        &self,
        cmd: ConfirmPaymentCommand,
    ) -> Result<ConfirmPaymentResult, WorkflowError> {
        // 1. Locate the payment, then serialize on its reservation
        let reservation_id = self.load_payment(&cmd.intent_id).await?.reservation_id;
        let _guard = self.locks.lock(reservation_id).await;
        let mut payment = self.load_payment(&cmd.intent_id).await?;
        let mut reservation = load_reservation(self.reservations.as_ref(), reservation_id).await?;

        // 2. Owner only
        ensure_owner(&reservation, &cmd.caller.id)?;

        // 3. Ask the processor, unless already settled
        let (intent_status, change) = match payment.status {
            PaymentStatus::Paid => (IntentStatus::Succeeded, StatusChange::Unchanged),
            PaymentStatus::Failed | PaymentStatus::Refunded => {
                return Err(WorkflowError::conflict(format!(
                    "Payment {} is {} and cannot be confirmed",
                    payment.id, payment.status
                )))
            }
            PaymentStatus::Pending => {
                let intent = self
                    .processor
                    .confirm(&payment.intent_id, cmd.simulate_success)
                    .await
                    .map_err(DomainError::from)?;
                let change = payment.apply_status(intent.status.payment_status())?;
                (intent.status, change)
            }
        };

        // 4. Promote and persist
        let settlement = Settlement::after(change, &payment, &mut reservation);
        SettlementWriter {
            reservations: self.reservations.as_ref(),
            payments: self.payments.as_ref(),
            publisher: self.publisher.as_ref(),
        }
        .write(&payment, &reservation, &settlement, OutcomeSource::Confirmation)
        .await?;

        Ok(ConfirmPaymentResult {
            payment,
            intent_status,
            reservation_promoted: settlement.promoted,
        })
    }
}
