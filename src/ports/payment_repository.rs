//! Payment repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PaymentId};
use crate::domain::payment::Payment;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn save(&self, payment: &Payment) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// `PaymentNotFound` if it was never saved.
    async fn update(&self, payment: &Payment) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError>;

    /// Lookup by processor intent id, the key both confirmation channels use.
    async fn find_by_intent_id(&self, intent_id: &str) -> Result<Option<Payment>, DomainError>;
}
