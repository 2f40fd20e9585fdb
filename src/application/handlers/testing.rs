//! In-memory wiring shared by handler tests.

use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::events::InMemoryEventBus;
use crate::adapters::memory::{
    InMemoryAssignmentRepository, InMemoryCatalog, InMemoryPartnerDirectory,
    InMemoryPaymentRepository, InMemoryReservationRepository, InMemoryWebhookEventLog,
};
use crate::adapters::processor::StubPaymentProcessor;
use crate::application::KeyedLocks;
use crate::domain::assignment::PartnerAssignment;
use crate::domain::catalog::ServiceSummary;
use crate::domain::foundation::{
    AssignmentId, AuthenticatedUser, CategoryId, DomainError, ErrorCode, PartnerId, PaymentId,
    ReservationId, Role, ServiceId, Timestamp, UserId,
};
use crate::domain::partner::Partner;
use crate::domain::payment::Payment;
use crate::domain::reservation::{Reservation, ReservationDetails};
use crate::ports::{
    AssignmentRepository, PaymentRepository, ReservationRepository, WebhookEventRepository,
};

pub(crate) struct World {
    pub reservations: Arc<InMemoryReservationRepository>,
    pub assignments: Arc<InMemoryAssignmentRepository>,
    pub payments: Arc<InMemoryPaymentRepository>,
    pub partners: Arc<InMemoryPartnerDirectory>,
    pub catalog: Arc<InMemoryCatalog>,
    pub processor: Arc<StubPaymentProcessor>,
    pub webhook_log: Arc<InMemoryWebhookEventLog>,
    pub events: Arc<InMemoryEventBus>,
    pub locks: Arc<KeyedLocks<ReservationId>>,
    pub service: ServiceSummary,
    pub plumber: Partner,
    pub electrician: Partner,
    pub unverified: Partner,
}

impl World {
    pub fn new() -> Self {
        let service = ServiceSummary::new(ServiceId::new(), CategoryId::new(), "Leak repair");
        let plumber = partner("plumber-user", "plumbing", true);
        let electrician = partner("electrician-user", "electrical", true);
        let unverified = partner("rookie-user", "plumbing", false);

        let partners = InMemoryPartnerDirectory::new();
        for p in [&plumber, &electrician, &unverified] {
            partners.register(p.clone()).unwrap();
        }

        Self {
            reservations: Arc::new(InMemoryReservationRepository::new()),
            assignments: Arc::new(InMemoryAssignmentRepository::new()),
            payments: Arc::new(InMemoryPaymentRepository::new()),
            partners: Arc::new(partners),
            catalog: Arc::new(InMemoryCatalog::new().with_service(service.clone()).unwrap()),
            processor: Arc::new(StubPaymentProcessor::new()),
            webhook_log: Arc::new(InMemoryWebhookEventLog::new()),
            events: Arc::new(InMemoryEventBus::new()),
            locks: Arc::new(KeyedLocks::new()),
            service,
            plumber,
            electrician,
            unverified,
        }
    }

    /// Stores a fresh `new` reservation owned by `client()`.
    pub async fn reservation(&self) -> Reservation {
        let reservation = Reservation::create(
            client().id,
            self.service.clone(),
            details(),
            Timestamp::today(),
        )
        .unwrap();
        self.reservations.save(&reservation).await.unwrap();
        reservation
    }

    pub async fn stored(&self, id: ReservationId) -> Reservation {
        self.reservations.find_by_id(&id).await.unwrap().unwrap()
    }

    pub async fn webhook_logged(&self, event_id: &str) -> bool {
        self.webhook_log
            .find_by_event_id(event_id)
            .await
            .unwrap()
            .is_some()
    }
}

fn partner(user: &str, trade: &str, verified: bool) -> Partner {
    Partner::new(
        PartnerId::new(),
        UserId::new(user).unwrap(),
        format!("{} ({})", user, trade),
        trade,
        verified,
    )
}

pub(crate) fn details() -> ReservationDetails {
    ReservationDetails {
        address: "12 Elm Street".to_string(),
        postal_code: "1011AB".to_string(),
        description: "Dripping kitchen tap".to_string(),
        urgent: false,
        requested_date: Some(Timestamp::today()),
        time_slot: Some("09:00-12:00".to_string()),
    }
}

pub(crate) fn user(id: &str, role: Role) -> AuthenticatedUser {
    AuthenticatedUser::new(UserId::new(id).unwrap(), role, None)
}

pub(crate) fn client() -> AuthenticatedUser {
    user("client-1", Role::Client)
}

pub(crate) fn stranger() -> AuthenticatedUser {
    user("client-2", Role::Client)
}

pub(crate) fn admin() -> AuthenticatedUser {
    user("admin-1", Role::Admin)
}

pub(crate) fn as_partner(partner: &Partner) -> AuthenticatedUser {
    AuthenticatedUser::new(partner.user_id.clone(), Role::Partner, None)
}

fn storage_down() -> DomainError {
    DomainError::new(ErrorCode::StorageError, "storage unavailable")
}

/// Assignment store that refuses every write and holds nothing.
pub(crate) struct BrokenAssignments;

#[async_trait]
impl AssignmentRepository for BrokenAssignments {
    async fn save(&self, _assignment: &PartnerAssignment) -> Result<(), DomainError> {
        Err(storage_down())
    }

    async fn find_by_id(
        &self,
        _id: &AssignmentId,
    ) -> Result<Option<PartnerAssignment>, DomainError> {
        Ok(None)
    }

    async fn find_for(
        &self,
        _reservation_id: &ReservationId,
        _partner_id: &PartnerId,
    ) -> Result<Option<PartnerAssignment>, DomainError> {
        Ok(None)
    }

    async fn list_by_partner(
        &self,
        _partner_id: &PartnerId,
    ) -> Result<Vec<PartnerAssignment>, DomainError> {
        Ok(Vec::new())
    }
}

/// Reads through to a real payment store; writes fail.
pub(crate) struct ReadOnlyPayments(pub Arc<InMemoryPaymentRepository>);

#[async_trait]
impl PaymentRepository for ReadOnlyPayments {
    async fn save(&self, _payment: &Payment) -> Result<(), DomainError> {
        Err(storage_down())
    }

    async fn update(&self, _payment: &Payment) -> Result<(), DomainError> {
        Err(storage_down())
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError> {
        self.0.find_by_id(id).await
    }

    async fn find_by_intent_id(&self, intent_id: &str) -> Result<Option<Payment>, DomainError> {
        self.0.find_by_intent_id(intent_id).await
    }
}
