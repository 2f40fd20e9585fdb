//! Shared application state for the HTTP layer.

use std::sync::Arc;

use crate::adapters::events::InMemoryEventBus;
use crate::adapters::memory::{
    InMemoryAssignmentRepository, InMemoryPaymentRepository, InMemoryReservationRepository,
    InMemoryWebhookEventLog,
};
use crate::adapters::processor::StubPaymentProcessor;
use crate::application::handlers::assignment::{
    ListPartnerAssignmentsHandler, RespondToAssignmentHandler,
};
use crate::application::handlers::payment::{
    ConfirmPaymentHandler, CreatePaymentIntentHandler, HandlePaymentWebhookHandler,
};
use crate::application::handlers::reservation::{
    AssignPartnerHandler, CreateReservationHandler, GetReservationHandler,
    ListMyReservationsHandler, UpdateReservationStatusHandler,
};
use crate::application::KeyedLocks;
use crate::domain::foundation::ReservationId;
use crate::ports::{
    AssignmentRepository, Catalog, EventPublisher, PartnerDirectory, PaymentProcessor,
    PaymentRepository, ReservationRepository, WebhookEventRepository,
};

/// Shared application state containing all dependencies.
///
/// Cloned for each request; handlers are built on demand from the shared
/// ports.
#[derive(Clone)]
pub struct AppState {
    pub reservations: Arc<dyn ReservationRepository>,
    pub assignments: Arc<dyn AssignmentRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub partners: Arc<dyn PartnerDirectory>,
    pub catalog: Arc<dyn Catalog>,
    pub processor: Arc<dyn PaymentProcessor>,
    pub webhook_log: Arc<dyn WebhookEventRepository>,
    pub event_publisher: Arc<dyn EventPublisher>,
    pub locks: Arc<KeyedLocks<ReservationId>>,
    /// Currency every intent is opened in.
    pub currency: String,
}

impl AppState {
    /// State backed by in-memory storage, the processor stub and the
    /// in-memory event bus.
    pub fn in_memory(
        catalog: Arc<dyn Catalog>,
        partners: Arc<dyn PartnerDirectory>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            reservations: Arc::new(InMemoryReservationRepository::new()),
            assignments: Arc::new(InMemoryAssignmentRepository::new()),
            payments: Arc::new(InMemoryPaymentRepository::new()),
            partners,
            catalog,
            processor: Arc::new(StubPaymentProcessor::new()),
            webhook_log: Arc::new(InMemoryWebhookEventLog::new()),
            event_publisher: Arc::new(InMemoryEventBus::new()),
            locks: Arc::new(KeyedLocks::new()),
            currency: currency.into(),
        }
    }

    pub fn create_reservation_handler(&self) -> CreateReservationHandler {
        CreateReservationHandler::new(
            self.catalog.clone(),
            self.reservations.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn get_reservation_handler(&self) -> GetReservationHandler {
        GetReservationHandler::new(
            self.reservations.clone(),
            self.partners.clone(),
            self.catalog.clone(),
        )
    }

    pub fn list_my_reservations_handler(&self) -> ListMyReservationsHandler {
        ListMyReservationsHandler::new(self.reservations.clone())
    }

    pub fn update_status_handler(&self) -> UpdateReservationStatusHandler {
        UpdateReservationStatusHandler::new(
            self.reservations.clone(),
            self.partners.clone(),
            self.locks.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn assign_partner_handler(&self) -> AssignPartnerHandler {
        AssignPartnerHandler::new(
            self.reservations.clone(),
            self.assignments.clone(),
            self.partners.clone(),
            self.locks.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn respond_handler(&self) -> RespondToAssignmentHandler {
        RespondToAssignmentHandler::new(
            self.reservations.clone(),
            self.assignments.clone(),
            self.partners.clone(),
            self.locks.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn list_partner_assignments_handler(&self) -> ListPartnerAssignmentsHandler {
        ListPartnerAssignmentsHandler::new(self.assignments.clone(), self.partners.clone())
    }

    pub fn create_intent_handler(&self) -> CreatePaymentIntentHandler {
        CreatePaymentIntentHandler::new(
            self.reservations.clone(),
            self.payments.clone(),
            self.processor.clone(),
            self.locks.clone(),
            self.event_publisher.clone(),
            self.currency.clone(),
        )
    }

    pub fn confirm_payment_handler(&self) -> ConfirmPaymentHandler {
        ConfirmPaymentHandler::new(
            self.reservations.clone(),
            self.payments.clone(),
            self.processor.clone(),
            self.locks.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(
            self.reservations.clone(),
            self.payments.clone(),
            self.webhook_log.clone(),
            self.locks.clone(),
            self.event_publisher.clone(),
        )
    }
}
