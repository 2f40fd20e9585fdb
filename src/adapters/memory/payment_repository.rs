//! In-memory payment storage.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::poison_err;
use crate::domain::foundation::{DomainError, ErrorCode, PaymentId};
use crate::domain::payment::Payment;
use crate::ports::PaymentRepository;

#[derive(Debug, Default)]
pub struct InMemoryPaymentRepository {
    payments: RwLock<HashMap<PaymentId, Payment>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn save(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut payments = self.payments.write().map_err(poison_err)?;
        payments.insert(payment.id, payment.clone());
        Ok(())
    }

    async fn update(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut payments = self.payments.write().map_err(poison_err)?;
        match payments.get_mut(&payment.id) {
            Some(stored) => {
                *stored = payment.clone();
                Ok(())
            }
            None => Err(
                DomainError::new(ErrorCode::PaymentNotFound, "Payment not found")
                    .with_detail("id", payment.id.to_string()),
            ),
        }
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError> {
        let payments = self.payments.read().map_err(poison_err)?;
        Ok(payments.get(id).cloned())
    }

    async fn find_by_intent_id(&self, intent_id: &str) -> Result<Option<Payment>, DomainError> {
        let payments = self.payments.read().map_err(poison_err)?;
        Ok(payments.values().find(|p| p.intent_id == intent_id).cloned())
    }
}
