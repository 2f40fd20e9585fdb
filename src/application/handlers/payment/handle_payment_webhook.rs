//! HandlePaymentWebhookHandler - processor callback reporting an intent outcome.
//!
//! The signature is checked by the HTTP layer before this runs. Here the
//! event is mapped to a payment status and applied under the reservation
//! lock. Redeliveries of a logged event id are acknowledged untouched, and
//! an outcome the payment can no longer take is acknowledged and ignored
//! so the processor stops retrying.

use std::fmt;
use std::sync::Arc;

use crate::application::handlers::support::load_reservation;
use crate::application::KeyedLocks;
use crate::domain::foundation::ReservationId;
use crate::domain::payment::{OutcomeSource, Payment, ProcessorEventType, StatusChange};
use crate::domain::{Resource, WorkflowError};
use crate::ports::{
    EventPublisher, PaymentRepository, ReservationRepository, WebhookEventRecord,
    WebhookEventRepository,
};

use super::settlement::{Settlement, SettlementWriter};

#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Processor event id, used to drop redeliveries.
    pub event_id: Option<String>,
    pub event_type: String,
    pub intent_id: Option<String>,
}

/// How a callback was handled. Every variant is acknowledged to the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    Applied,
    /// Payment already had the reported status.
    Unchanged,
    /// Reported status is not reachable from the current one.
    Ignored,
    /// Event id seen before.
    Duplicate,
}

impl WebhookOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookOutcome::Applied => "applied",
            WebhookOutcome::Unchanged => "unchanged",
            WebhookOutcome::Ignored => "ignored",
            WebhookOutcome::Duplicate => "duplicate",
        }
    }
}

impl fmt::Display for WebhookOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct HandlePaymentWebhookHandler {
    reservations: Arc<dyn ReservationRepository>,
    payments: Arc<dyn PaymentRepository>,
    webhook_log: Arc<dyn WebhookEventRepository>,
    locks: Arc<KeyedLocks<ReservationId>>,
    publisher: Arc<dyn EventPublisher>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        payments: Arc<dyn PaymentRepository>,
        webhook_log: Arc<dyn WebhookEventRepository>,
        locks: Arc<KeyedLocks<ReservationId>>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            reservations,
            payments,
            webhook_log,
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

    #[tracing::instrument(skip(self, cmd), fields(event_type = %cmd.event_type, event_id = ?cmd.event_id))]
    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<WebhookOutcome, WorkflowError> {
        // 1. Validate the payload
        let event_type = ProcessorEventType::parse(&cmd.event_type).ok_or_else(|| {
            WorkflowError::validation(
                "type",
                format!("Unsupported event type '{}'", cmd.event_type),
            )
        })?;
        let intent_id = cmd
            .intent_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| WorkflowError::validation("data.object.id", "Missing intent id"))?;
        let event_id = cmd
            .event_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty());

        // 2. Locate the payment, then serialize on its reservation
        let reservation_id = self.load_payment(intent_id).await?.reservation_id;
        let _guard = self.locks.lock(reservation_id).await;

        // 3. Drop redeliveries
        if let Some(event_id) = event_id {
            if self.webhook_log.find_by_event_id(event_id).await?.is_some() {
                tracing::info!(intent_id, "Webhook event already processed");
                return Ok(WebhookOutcome::Duplicate);
            }
        }

        let mut payment = self.load_payment(intent_id).await?;
        let mut reservation = load_reservation(self.reservations.as_ref(), reservation_id).await?;

        // 4. Apply the reported status
        let target = event_type.target_status();
        let outcome = match payment.apply_status(target) {
            Ok(change) => {
                let settlement = Settlement::after(change, &payment, &mut reservation);
                SettlementWriter {
                    reservations: self.reservations.as_ref(),
                    payments: self.payments.as_ref(),
                    publisher: self.publisher.as_ref(),
                }
                .write(&payment, &reservation, &settlement, OutcomeSource::Webhook)
                .await?;
                match change {
                    StatusChange::Changed { .. } => WebhookOutcome::Applied,
                    StatusChange::Unchanged => WebhookOutcome::Unchanged,
                }
            }
            Err(e) => {
                tracing::warn!(
                    intent_id,
                    payment_id = %payment.id,
                    current = %payment.status,
                    reported = %target,
                    "Ignoring webhook outcome: {}",
                    e
                );
                WebhookOutcome::Ignored
            }
        };

        // 5. Remember the event id
        if let Some(event_id) = event_id {
            let record = WebhookEventRecord::new(
                event_id,
                event_type.as_str(),
                intent_id,
                outcome.as_str(),
            );
            self.webhook_log.save(record).await?;
        }

        tracing::info!(intent_id, outcome = %outcome, "Webhook handled");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::payment::{
        ConfirmPaymentCommand, ConfirmPaymentHandler, CreatePaymentIntentCommand,
        CreatePaymentIntentHandler,
    };
    use crate::application::handlers::testing::{client, World};
    use crate::domain::payment::PaymentStatus;
    use crate::domain::reservation::ReservationStatus;

    fn handler(world: &World) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(
            world.reservations.clone(),
            world.payments.clone(),
            world.webhook_log.clone(),
            world.locks.clone(),
            world.events.clone(),
        )
    }

    async fn open_intent(world: &World, id: ReservationId) -> String {
        CreatePaymentIntentHandler::new(
            world.reservations.clone(),
            world.payments.clone(),
            world.processor.clone(),
            world.locks.clone(),
            world.events.clone(),
            "eur",
        )
        .handle(CreatePaymentIntentCommand {
            caller: client(),
            reservation_id: id,
            amount: 120.0,
        })
        .await
        .unwrap()
        .intent_id
    }

    fn event(event_id: &str, event_type: &str, intent_id: &str) -> HandlePaymentWebhookCommand {
        HandlePaymentWebhookCommand {
            event_id: Some(event_id.to_string()),
            event_type: event_type.to_string(),
            intent_id: Some(intent_id.to_string()),
        }
    }

    async fn payment_status(world: &World, intent_id: &str) -> PaymentStatus {
        world
            .payments
            .find_by_intent_id(intent_id)
            .await
            .unwrap()
            .unwrap()
            .status
    }

    #[tokio::test]
    async fn succeeded_event_pays_and_promotes() {
        let world = World::new();
        let reservation = world.reservation().await;
        let intent_id = open_intent(&world, reservation.id).await;

        let outcome = handler(&world)
            .handle(event("evt_1", "payment_intent.succeeded", &intent_id))
            .await
            .unwrap();

        assert_eq!(outcome, WebhookOutcome::Applied);
        assert_eq!(payment_status(&world, &intent_id).await, PaymentStatus::Paid);
        assert_eq!(world.stored(reservation.id).await.status, ReservationStatus::Confirmed);
        assert!(world.webhook_logged("evt_1").await);
    }

    #[tokio::test]
    async fn webhook_after_confirmation_changes_nothing() {
        let world = World::new();
        let reservation = world.reservation().await;
        let intent_id = open_intent(&world, reservation.id).await;
        ConfirmPaymentHandler::new(
            world.reservations.clone(),
            world.payments.clone(),
            world.processor.clone(),
            world.locks.clone(),
            world.events.clone(),
        )
        .handle(ConfirmPaymentCommand {
            caller: client(),
            intent_id: intent_id.clone(),
            simulate_success: true,
        })
        .await
        .unwrap();
        let version = world.stored(reservation.id).await.version;

        let outcome = handler(&world)
            .handle(event("evt_2", "payment_intent.succeeded", &intent_id))
            .await
            .unwrap();

        assert_eq!(outcome, WebhookOutcome::Unchanged);
        let stored = world.stored(reservation.id).await;
        assert_eq!(stored.status, ReservationStatus::Confirmed);
        assert_eq!(stored.version, version);
    }

    #[tokio::test]
    async fn redelivered_event_is_duplicate() {
        let world = World::new();
        let reservation = world.reservation().await;
        let intent_id = open_intent(&world, reservation.id).await;
        let handler = handler(&world);
        handler
            .handle(event("evt_3", "payment_intent.payment_failed", &intent_id))
            .await
            .unwrap();

        let again = handler
            .handle(event("evt_3", "payment_intent.payment_failed", &intent_id))
            .await
            .unwrap();

        assert_eq!(again, WebhookOutcome::Duplicate);
        assert_eq!(payment_status(&world, &intent_id).await, PaymentStatus::Failed);
    }

    #[tokio::test]
    async fn failure_after_paid_is_ignored() {
        let world = World::new();
        let reservation = world.reservation().await;
        let intent_id = open_intent(&world, reservation.id).await;
        let handler = handler(&world);
        handler
            .handle(event("evt_4", "payment_intent.succeeded", &intent_id))
            .await
            .unwrap();

        let outcome = handler
            .handle(event("evt_5", "payment_intent.canceled", &intent_id))
            .await
            .unwrap();

        assert_eq!(outcome, WebhookOutcome::Ignored);
        assert_eq!(payment_status(&world, &intent_id).await, PaymentStatus::Paid);
        assert!(world.webhook_logged("evt_5").await);
    }

    #[tokio::test]
    async fn refund_follows_paid_and_keeps_reservation() {
        let world = World::new();
        let reservation = world.reservation().await;
        let intent_id = open_intent(&world, reservation.id).await;
        let handler = handler(&world);
        handler
            .handle(event("evt_6", "payment_intent.succeeded", &intent_id))
            .await
            .unwrap();

        let outcome = handler
            .handle(event("evt_7", "charge.refunded", &intent_id))
            .await
            .unwrap();

        assert_eq!(outcome, WebhookOutcome::Applied);
        assert_eq!(payment_status(&world, &intent_id).await, PaymentStatus::Refunded);
        assert_eq!(world.stored(reservation.id).await.status, ReservationStatus::Confirmed);
    }

    #[tokio::test]
    async fn cancelled_reservation_is_not_promoted() {
        let world = World::new();
        let reservation = world.reservation().await;
        let intent_id = open_intent(&world, reservation.id).await;
        let mut cancelled = world.stored(reservation.id).await;
        cancelled.change_status(ReservationStatus::Cancelled).unwrap();
        world.reservations.update(&cancelled).await.unwrap();

        handler(&world)
            .handle(event("evt_8", "payment_intent.succeeded", &intent_id))
            .await
            .unwrap();

        assert_eq!(world.stored(reservation.id).await.status, ReservationStatus::Cancelled);
    }

    #[tokio::test]
    async fn malformed_events_are_rejected() {
        let world = World::new();

        let unknown_type = handler(&world)
            .handle(event("evt_9", "customer.created", "pi_1"))
            .await
            .unwrap_err();
        let missing_intent = handler(&world)
            .handle(HandlePaymentWebhookCommand {
                event_id: None,
                event_type: "payment_intent.succeeded".to_string(),
                intent_id: Some("  ".to_string()),
            })
            .await
            .unwrap_err();
        let unknown_intent = handler(&world)
            .handle(event("evt_10", "payment_intent.succeeded", "pi_missing"))
            .await
            .unwrap_err();

        assert!(matches!(unknown_type, WorkflowError::Validation { ref field, .. } if field == "type"));
        assert!(matches!(missing_intent, WorkflowError::Validation { ref field, .. } if field == "data.object.id"));
        assert!(matches!(unknown_intent, WorkflowError::NotFound { resource: Resource::Payment, .. }));
        assert!(!world.webhook_logged("evt_9").await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_confirmations_and_webhooks_settle_once() {
        let world = World::new();
        let reservation = world.reservation().await;
        let intent_id = open_intent(&world, reservation.id).await;
        let linked = world.stored(reservation.id).await;

        let confirmer = Arc::new(ConfirmPaymentHandler::new(
            world.reservations.clone(),
            world.payments.clone(),
            world.processor.clone(),
            world.locks.clone(),
            world.events.clone(),
        ));
        let webhook = Arc::new(handler(&world));

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let confirmer = confirmer.clone();
            let cmd = ConfirmPaymentCommand {
                caller: client(),
                intent_id: intent_id.clone(),
                simulate_success: true,
            };
            tasks.push(tokio::spawn(async move {
                confirmer.handle(cmd).await.map(|r| r.reservation_promoted)
            }));

            let webhook = webhook.clone();
            let cmd = HandlePaymentWebhookCommand {
                event_id: None,
                event_type: "payment_intent.succeeded".to_string(),
                intent_id: Some(intent_id.clone()),
            };
            tasks.push(tokio::spawn(async move {
                webhook
                    .handle(cmd)
                    .await
                    .map(|outcome| outcome == WebhookOutcome::Applied)
            }));
        }

        let mut settled = 0;
        for task in tasks {
            if task.await.unwrap().unwrap() {
                settled += 1;
            }
        }

        assert_eq!(settled, 1);
        assert_eq!(payment_status(&world, &intent_id).await, PaymentStatus::Paid);
        let stored = world.stored(reservation.id).await;
        assert_eq!(stored.status, ReservationStatus::Confirmed);
        assert_eq!(stored.version, linked.version + 1);
        assert_eq!(world.events.events_of_type("payment.status_changed.v1").len(), 1);
        assert_eq!(world.events.events_of_type("reservation.status_changed.v1").len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn parallel_redeliveries_apply_once() {
        let world = World::new();
        let reservation = world.reservation().await;
        let intent_id = open_intent(&world, reservation.id).await;
        let webhook = Arc::new(handler(&world));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let webhook = webhook.clone();
                let cmd = event("evt_par", "payment_intent.succeeded", &intent_id);
                tokio::spawn(async move { webhook.handle(cmd).await })
            })
            .collect();

        let mut outcomes = Vec::new();
        for task in tasks {
            outcomes.push(task.await.unwrap().unwrap());
        }

        let applied = outcomes.iter().filter(|o| **o == WebhookOutcome::Applied).count();
        assert_eq!(applied, 1);
        assert!(outcomes
            .iter()
            .all(|o| matches!(o, WebhookOutcome::Applied | WebhookOutcome::Duplicate)));
        assert_eq!(world.stored(reservation.id).await.status, ReservationStatus::Confirmed);
    }
}
